//! Day-master classifier

use crate::strength::ElementStrengthTable;
use bazi_common::ElementCategory;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Beneficial vs harmful strength around the self element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayMasterStrength {
    pub beneficial_total: f64,
    pub harmful_total: f64,
}

impl DayMasterStrength {
    pub fn new(beneficial_total: f64, harmful_total: f64) -> Self {
        Self {
            beneficial_total: beneficial_total.max(0.0),
            harmful_total: harmful_total.max(0.0),
        }
    }

    pub fn total(&self) -> f64 {
        self.beneficial_total + self.harmful_total
    }

    /// Beneficial share in percent; 50 when both totals are zero
    pub fn percentage(&self) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.beneficial_total / total * 100.0
        } else {
            50.0
        }
    }

    pub fn harmful_percentage(&self) -> f64 {
        100.0 - self.percentage()
    }

    pub fn is_dominant(&self) -> bool {
        self.percentage() >= 50.0
    }

    pub fn label(&self) -> &'static str {
        if self.is_dominant() {
            "dominant"
        } else {
            "deficient"
        }
    }
}

/// Sum adjusted strength over the beneficial and harmful sets of `self_element`
pub fn classify_day_master(
    adjusted: &ElementStrengthTable,
    self_element: ElementCategory,
) -> DayMasterStrength {
    let beneficial: f64 = self_element
        .beneficial_set()
        .iter()
        .map(|&e| adjusted.get(e))
        .sum();
    let harmful: f64 = self_element
        .harmful_set()
        .iter()
        .map(|&e| adjusted.get(e))
        .sum();

    let strength = DayMasterStrength::new(beneficial, harmful);
    debug!(
        "Day master {}: beneficial {:.2}, harmful {:.2} ({:.1}%, {})",
        self_element,
        strength.beneficial_total,
        strength.harmful_total,
        strength.percentage(),
        strength.label()
    );
    strength
}
