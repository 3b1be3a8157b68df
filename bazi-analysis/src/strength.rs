//! Elemental strength calculator
//!
//! Three passes over the four pillars:
//! 1. Raw: stem/branch balance weights, hidden stems split by ratio
//! 2. Seasonal: the same sums with each contribution scaled by its
//!    element's seasonal multiplier
//! 3. Adjusted: seasonal totals modified by branch combinations and clashes

use crate::relations::{analyze_relations, RelationKind, RelationsReport};
use bazi_common::{Chart, ElementCategory, ElementRelation, Pillar, Season, SeasonalPhase};
use serde::ser::Serializer;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Multiplier for a complete directional triad
pub const DIRECTIONAL_MULTIPLIER: f64 = 2.0;
/// Multiplier for a complete three-harmony triad
pub const THREE_HARMONY_MULTIPLIER: f64 = 1.8;

/// Clash penalty by pillar distance: adjacent 0.7, skip-one 0.8, year-hour 0.9
pub fn clash_multiplier(distance: usize) -> f64 {
    match distance {
        0 | 1 => 0.7,
        2 => 0.8,
        _ => 0.9,
    }
}

/// (stem_weight, branch_weight) for a pillar from its stem/branch relation
pub fn pillar_weights(pillar: &Pillar) -> (f64, f64) {
    match pillar.stem.element().relation_to(pillar.branch.element()) {
        ElementRelation::Same => (10.0, 10.0),
        ElementRelation::Generates => (6.0, 8.0),
        ElementRelation::Overcomes => (4.0, 2.0),
        ElementRelation::OvercomeBy => (2.0, 4.0),
        ElementRelation::GeneratedBy => (8.0, 6.0),
    }
}

/// Non-negative strength for each of the five elements
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementStrengthTable {
    values: [f64; 5],
}

impl ElementStrengthTable {
    pub fn new(values: [f64; 5]) -> Self {
        Self {
            values: values.map(|v| v.max(0.0)),
        }
    }

    pub fn get(&self, element: ElementCategory) -> f64 {
        self.values[element.index()]
    }

    pub fn add(&mut self, element: ElementCategory, amount: f64) {
        let slot = &mut self.values[element.index()];
        *slot = (*slot + amount).max(0.0);
    }

    pub fn scale(&mut self, element: ElementCategory, factor: f64) {
        let slot = &mut self.values[element.index()];
        *slot = (*slot * factor).max(0.0);
    }

    /// (element, value) in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (ElementCategory, f64)> + '_ {
        ElementCategory::all().iter().map(move |&e| (e, self.get(e)))
    }

    pub fn values(&self) -> [f64; 5] {
        self.values
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Share of the total, 0 when the total is 0
    pub fn fraction(&self, element: ElementCategory) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.get(element) / total
        } else {
            0.0
        }
    }

    pub fn percentage(&self, element: ElementCategory) -> f64 {
        self.fraction(element) * 100.0
    }

    /// Largest value; earlier elements win ties
    pub fn strongest(&self) -> ElementCategory {
        self.pick(|candidate, best| candidate > best)
    }

    /// Smallest value; earlier elements win ties
    pub fn weakest(&self) -> ElementCategory {
        self.pick(|candidate, best| candidate < best)
    }

    fn pick(&self, better: impl Fn(f64, f64) -> bool) -> ElementCategory {
        let mut best = ElementCategory::Wood;
        for (element, value) in self.iter() {
            if better(value, self.get(best)) {
                best = element;
            }
        }
        best
    }
}

impl Serialize for ElementStrengthTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Strength tables for one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthAnalysis {
    pub season: Season,
    pub phases: BTreeMap<ElementCategory, SeasonalPhase>,
    /// No season, no relations
    pub raw: ElementStrengthTable,
    /// Season applied, relations not yet
    pub seasonal: ElementStrengthTable,
    /// Season and relation modifiers applied
    pub adjusted: ElementStrengthTable,
}

impl StrengthAnalysis {
    pub fn multiplier(&self, element: ElementCategory) -> f64 {
        self.season.phase_of(element).multiplier()
    }
}

/// Sum pillar contributions, each scaled by its element's multiplier
fn accumulate(chart: &Chart, multipliers: &[f64; 5]) -> ElementStrengthTable {
    let mut table = ElementStrengthTable::default();
    for pillar in chart.pillars() {
        let (stem_weight, branch_weight) = pillar_weights(pillar);
        let stem_element = pillar.stem.element();
        table.add(stem_element, stem_weight * multipliers[stem_element.index()]);

        for hidden in pillar.branch.hidden_stems() {
            let element = hidden.stem.element();
            table.add(element, branch_weight * hidden.ratio * multipliers[element.index()]);
        }
    }
    table
}

/// Apply combination bonuses, then clash penalties
pub fn apply_relation_modifiers(
    seasonal: &ElementStrengthTable,
    relations: &RelationsReport,
) -> ElementStrengthTable {
    let mut adjusted = *seasonal;

    // Strongest combination per element, applied once
    let mut bonus = [1.0_f64; 5];
    let combinations = relations.directional.iter().chain(&relations.three_harmony);
    for record in combinations {
        let factor = match record.kind {
            RelationKind::DirectionalTriad => DIRECTIONAL_MULTIPLIER,
            _ => THREE_HARMONY_MULTIPLIER,
        };
        if let Some(element) = record.element {
            let slot = &mut bonus[element.index()];
            *slot = slot.max(factor);
        }
    }
    for &element in ElementCategory::all() {
        adjusted.scale(element, bonus[element.index()]);
    }

    for record in &relations.clash {
        let factor = clash_multiplier(record.distance().unwrap_or(2));
        for branch in &record.branches {
            adjusted.scale(branch.element(), factor);
        }
    }

    adjusted
}

/// Compute raw, seasonal and adjusted tables from already-detected relations
pub fn calculate_strength(
    chart: &Chart,
    earth_dominant: bool,
    relations: &RelationsReport,
) -> StrengthAnalysis {
    let season = Season::for_month(chart.month_branch(), earth_dominant);
    let raw = accumulate(chart, &[1.0; 5]);
    let seasonal = accumulate(chart, &season.multipliers());
    let adjusted = apply_relation_modifiers(&seasonal, relations);

    debug!(
        "Strength for {} ({}): raw {:?}, seasonal {:?}, adjusted {:?}",
        chart,
        season,
        raw.values(),
        seasonal.values(),
        adjusted.values()
    );

    StrengthAnalysis {
        season,
        phases: ElementCategory::all()
            .iter()
            .map(|&e| (e, season.phase_of(e)))
            .collect(),
        raw,
        seasonal,
        adjusted,
    }
}

/// Detect relations and compute strength tables for a chart
pub fn analyze_strength(chart: &Chart, earth_dominant: bool) -> (StrengthAnalysis, RelationsReport) {
    let relations = analyze_relations(chart);
    let strength = calculate_strength(chart, earth_dominant, &relations);
    (strength, relations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(s: &str) -> Chart {
        s.parse().unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_pillar_weights() {
        assert_eq!(pillar_weights(&"甲寅".parse().unwrap()), (10.0, 10.0));
        assert_eq!(pillar_weights(&"甲午".parse().unwrap()), (6.0, 8.0));
        assert_eq!(pillar_weights(&"甲辰".parse().unwrap()), (4.0, 2.0));
        assert_eq!(pillar_weights(&"甲申".parse().unwrap()), (2.0, 4.0));
        assert_eq!(pillar_weights(&"甲子".parse().unwrap()), (8.0, 6.0));
    }

    #[test]
    fn test_raw_totals_for_single_pillar_type() {
        // 甲寅: stem 10 Wood; branch 10 × (甲.6 丙.3 戊.1)
        let (analysis, _) = analyze_strength(&chart("甲寅 甲寅 甲寅 甲寅"), false);
        assert!(approx(analysis.raw.get(ElementCategory::Wood), 4.0 * 16.0));
        assert!(approx(analysis.raw.get(ElementCategory::Fire), 4.0 * 3.0));
        assert!(approx(analysis.raw.get(ElementCategory::Earth), 4.0 * 1.0));
        assert!(approx(analysis.raw.get(ElementCategory::Metal), 0.0));
    }

    #[test]
    fn test_combination_bonus_not_stacked() {
        let seasonal = ElementStrengthTable::new([10.0, 10.0, 10.0, 10.0, 10.0]);
        let relations = analyze_relations(&chart("甲寅 乙卯 丙辰 丁亥"));
        assert_eq!(relations.directional.len(), 1);
        let adjusted = apply_relation_modifiers(&seasonal, &relations);
        assert!(approx(adjusted.get(ElementCategory::Wood), 20.0));
        assert!(approx(adjusted.get(ElementCategory::Fire), 10.0));
    }

    #[test]
    fn test_same_element_clash_hits_twice() {
        // 辰戌 clash, both Earth, adjacent
        let seasonal = ElementStrengthTable::new([10.0, 10.0, 10.0, 10.0, 10.0]);
        let relations = analyze_relations(&chart("甲子 丙辰 戊戌 庚子"));
        assert_eq!(relations.clash.len(), 1);
        let adjusted = apply_relation_modifiers(&seasonal, &relations);
        assert!(approx(adjusted.get(ElementCategory::Earth), 10.0 * 0.7 * 0.7));
    }

    #[test]
    fn test_table_queries() {
        let table = ElementStrengthTable::new([1.0, 3.0, 3.0, 0.0, 3.0]);
        assert_eq!(table.strongest(), ElementCategory::Fire);
        assert_eq!(table.weakest(), ElementCategory::Metal);
        assert!(approx(table.total(), 10.0));
        assert!(approx(table.percentage(ElementCategory::Wood), 10.0));

        let empty = ElementStrengthTable::default();
        assert_eq!(empty.fraction(ElementCategory::Water), 0.0);
        assert_eq!(empty.strongest(), ElementCategory::Wood);
    }

    #[test]
    fn test_negative_values_clamped() {
        let mut table = ElementStrengthTable::new([-1.0, 2.0, 0.0, 0.0, 0.0]);
        assert_eq!(table.get(ElementCategory::Wood), 0.0);
        table.add(ElementCategory::Fire, -5.0);
        assert_eq!(table.get(ElementCategory::Fire), 0.0);
    }

    #[test]
    fn test_table_serializes_as_map() {
        let table = ElementStrengthTable::new([1.0, 0.0, 0.0, 0.0, 2.5]);
        let json = serde_json::to_value(table).unwrap();
        assert_eq!(json["Wood"], 1.0);
        assert_eq!(json["Water"], 2.5);
    }
}
