//! Scoring configuration
//!
//! Weight profiles for the integrated scorer. Each profile maps a strategy
//! name to its weight. Callers supply TOML text; nothing here touches the
//! filesystem.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

pub const SUPPORT_SUPPRESS: &str = "support_suppress";
pub const CLIMATE: &str = "climate";
pub const MEDIATION: &str = "mediation";

/// Allowed deviation of a profile sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Strategy name → weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightProfile(BTreeMap<String, f64>);

impl WeightProfile {
    pub fn new<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self(weights.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn weight(&self, strategy: &str) -> Option<f64> {
        self.0.get(strategy).copied()
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Check weights against the registered strategy names
    pub fn validate(&self, label: &str, strategies: &[&str]) -> Result<()> {
        for (name, weight) in self.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(reject(format!(
                    "{} profile: weight for '{}' must be finite and non-negative, got {}",
                    label, name, weight
                )));
            }
            if !strategies.contains(&name) {
                return Err(reject(format!(
                    "{} profile names unknown strategy '{}'",
                    label, name
                )));
            }
        }
        for strategy in strategies {
            if self.weight(strategy).is_none() {
                return Err(reject(format!(
                    "{} profile has no weight for strategy '{}'",
                    label, strategy
                )));
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(reject(format!(
                "{} profile weights sum to {}, expected 1.0",
                label, sum
            )));
        }
        Ok(())
    }
}

fn reject(message: String) -> Error {
    warn!("Rejected scoring configuration: {}", message);
    Error::Config(message)
}

fn default_extreme() -> WeightProfile {
    WeightProfile::new([(SUPPORT_SUPPRESS, 0.40), (CLIMATE, 0.40), (MEDIATION, 0.20)])
}

fn default_standard() -> WeightProfile {
    WeightProfile::new([(SUPPORT_SUPPRESS, 0.50), (CLIMATE, 0.30), (MEDIATION, 0.20)])
}

/// Weight profiles for extreme and standard seasons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Used when the climate season is extreme cold or extreme hot
    #[serde(default = "default_extreme")]
    pub extreme: WeightProfile,

    /// Used for every other season
    #[serde(default = "default_standard")]
    pub standard: WeightProfile,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            extreme: default_extreme(),
            standard: default_standard(),
        }
    }
}

impl ScoringConfig {
    /// Parse TOML text and validate against the default strategy names
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ScoringConfig = toml::from_str(text)
            .map_err(|e| reject(format!("invalid TOML: {}", e)))?;
        config.validate(&[SUPPORT_SUPPRESS, CLIMATE, MEDIATION])?;
        Ok(config)
    }

    pub fn validate(&self, strategies: &[&str]) -> Result<()> {
        self.extreme.validate("extreme", strategies)?;
        self.standard.validate("standard", strategies)?;
        Ok(())
    }

    pub fn profile(&self, extreme: bool) -> &WeightProfile {
        if extreme {
            &self.extreme
        } else {
            &self.standard
        }
    }
}
