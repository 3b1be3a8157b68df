//! # BaZi Analysis
//!
//! Strength and favorability inference over a four-pillar chart:
//! - Branch relationship detection
//! - Raw, seasonal and relation-adjusted element strength
//! - Day-master classification
//! - Traditional and integrated favorable-element derivation
//! - Climate-adjustment and conflict-mediation scoring

pub mod climate;
pub mod day_master;
pub mod favorable;
pub mod mediation;
pub mod pipeline;
pub mod relations;
pub mod scoring;
pub mod strength;

pub use climate::{analyze_climate, ClimateAdjustment, SeasonIntensity};
pub use day_master::{classify_day_master, DayMasterStrength};
pub use favorable::{derive_favorable_traditional, FavorableElementSet, FavorableRole};
pub use mediation::{analyze_mediation, ElementConflict, MediationResult};
pub use pipeline::{analyze_chart, analyze_moment, ChartAnalysis, ChartAnalyzer};
pub use relations::{analyze_relations, BranchAnalyzer, RelationKind, RelationRecord, RelationsReport};
pub use scoring::{
    derive_favorable_integrated, IntegratedResult, IntegratedScorer, MethodContribution, MethodScore,
    ScoringContext, ScoringStrategy,
};
pub use strength::{analyze_strength, ElementStrengthTable, StrengthAnalysis};
