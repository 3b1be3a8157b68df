//! Multi-method favorability scoring
//!
//! Each scoring method is a [`ScoringStrategy`] producing one contribution
//! per element. The [`IntegratedScorer`] combines the contributions with a
//! season-dependent weight profile and picks the winning element.

pub mod integrated;
pub mod strategies;

pub use integrated::{derive_favorable_integrated, IntegratedResult, IntegratedScorer, MethodScore};
pub use strategies::{default_strategies, ClimateStrategy, MediationStrategy, SupportSuppressStrategy};

use crate::climate::ClimateAdjustment;
use crate::day_master::DayMasterStrength;
use crate::favorable::FavorableElementSet;
use crate::mediation::MediationResult;
use crate::strength::ElementStrengthTable;
use bazi_common::{Chart, ElementCategory};
use serde::Serialize;
use std::collections::HashMap;

/// Inputs shared by every strategy for one chart
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    pub chart: &'a Chart,
    pub strength: &'a DayMasterStrength,
    pub adjusted: &'a ElementStrengthTable,
    pub traditional: FavorableElementSet,
    pub climate: ClimateAdjustment,
    pub mediation: MediationResult,
}

impl<'a> ScoringContext<'a> {
    pub fn self_element(&self) -> ElementCategory {
        self.chart.self_element()
    }
}

/// Per-element output of one strategy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodContribution {
    pub name: String,
    /// Indexed by enumeration order
    pub scores: [f64; 5],
    pub metadata: HashMap<String, serde_json::Value>,
}

impl MethodContribution {
    pub fn new(name: &str, scores: [f64; 5]) -> Self {
        Self {
            name: name.to_string(),
            scores,
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: serde_json::Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    pub fn score(&self, element: ElementCategory) -> f64 {
        self.scores[element.index()]
    }
}

/// A favorability scoring method
pub trait ScoringStrategy: Send + Sync {
    /// Key used in weight profiles
    fn name(&self) -> &'static str;

    fn contribute(&self, ctx: &ScoringContext<'_>) -> MethodContribution;
}
