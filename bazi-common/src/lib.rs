//! # BaZi Common Library
//!
//! Shared model for chart analysis:
//! - Element categories, polarity, stem and branch tokens
//! - Seasons and seasonal phases
//! - Pillars and charts
//! - Static branch relation tables
//! - Scoring configuration
//! - Calendar oracle interface

pub mod chart;
pub mod config;
pub mod elements;
pub mod error;
pub mod oracle;
pub mod season;
pub mod tables;
pub mod tokens;

pub use chart::{Chart, Pillar, PillarPosition};
pub use config::{ScoringConfig, WeightProfile};
pub use elements::{ElementCategory, ElementRelation, Polarity};
pub use error::{Error, Result};
pub use oracle::CalendarOracle;
pub use season::{Season, SeasonalPhase};
pub use tables::PunishmentKind;
pub use tokens::{BranchToken, HiddenStem, StemToken};
