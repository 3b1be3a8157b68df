//! Conflict-mediation scorer
//!
//! Two elements "war" when one overcomes the other and both hold a
//! comparable, significant share of the chart. The bridge element (what
//! the attacker generates, which in turn generates the defender) mediates.

use crate::strength::ElementStrengthTable;
use bazi_common::ElementCategory;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum share each side needs for a conflict
pub const CONFLICT_THRESHOLD: f64 = 0.15;
/// Minimum weaker/stronger ratio for a conflict
pub const BALANCE_THRESHOLD: f64 = 0.5;

/// One attacker/defender war
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementConflict {
    pub attacker: ElementCategory,
    pub defender: ElementCategory,
    pub attacker_fraction: f64,
    pub defender_fraction: f64,
    pub mediator: ElementCategory,
    /// min(fractions) × 2, at most 1.0
    pub severity: f64,
}

/// Conflicts and normalized mediator scores for one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediationResult {
    /// Sorted by severity, highest first
    pub conflicts: Vec<ElementConflict>,
    /// Normalized to [0, 1], indexed by enumeration order
    pub scores: [f64; 5],
    pub primary_mediator: Option<ElementCategory>,
    pub has_conflict: bool,
}

impl MediationResult {
    pub fn score(&self, element: ElementCategory) -> f64 {
        self.scores[element.index()]
    }
}

/// Detect wars in the overcoming cycle and score their bridges
pub fn analyze_mediation(adjusted: &ElementStrengthTable) -> MediationResult {
    let mut conflicts = detect_conflicts(adjusted);
    // Stable: equal severities keep detection order
    conflicts.sort_by(|a, b| b.severity.total_cmp(&a.severity));

    let mut totals = [0.0_f64; 5];
    for conflict in &conflicts {
        totals[conflict.mediator.index()] += conflict.severity;
    }
    let scores = normalize(totals);

    let primary_mediator = if conflicts.is_empty() {
        None
    } else {
        let mut best = ElementCategory::Wood;
        for &element in ElementCategory::all() {
            if scores[element.index()] > scores[best.index()] {
                best = element;
            }
        }
        Some(best)
    };

    debug!(
        "Mediation: {} conflicts, scores {:?}, primary mediator {:?}",
        conflicts.len(),
        scores,
        primary_mediator
    );

    MediationResult {
        has_conflict: !conflicts.is_empty(),
        conflicts,
        scores,
        primary_mediator,
    }
}

fn detect_conflicts(adjusted: &ElementStrengthTable) -> Vec<ElementConflict> {
    if adjusted.total() <= 0.0 {
        return Vec::new();
    }

    ElementCategory::all()
        .iter()
        .filter_map(|&attacker| {
            let defender = attacker.overcomes();
            let fa = adjusted.fraction(attacker);
            let fd = adjusted.fraction(defender);
            if fa < CONFLICT_THRESHOLD || fd < CONFLICT_THRESHOLD {
                return None;
            }
            if fa.min(fd) / fa.max(fd) < BALANCE_THRESHOLD {
                return None;
            }
            Some(ElementConflict {
                attacker,
                defender,
                attacker_fraction: fa,
                defender_fraction: fd,
                mediator: attacker.generates(),
                severity: (fa.min(fd) * 2.0).min(1.0),
            })
        })
        .collect()
}

/// Min-max normalize; a flat input maps positive values to 1 and zeros to 0
fn normalize(totals: [f64; 5]) -> [f64; 5] {
    let min = totals.iter().copied().fold(f64::INFINITY, f64::min);
    let max = totals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    totals.map(|v| {
        if range > 0.0 {
            (v - min) / range
        } else if v > 0.0 {
            1.0
        } else {
            0.0
        }
    })
}
