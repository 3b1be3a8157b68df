//! Integrated multi-method scorer
//!
//! Weighted combinator over a list of strategies. The season's climate
//! intensity selects the weight profile, the highest combined score picks
//! the primary favorable element, and the other four roles are re-derived
//! from that winner through the element cycles.

use super::{default_strategies, MethodContribution, ScoringContext, ScoringStrategy};
use crate::climate::{analyze_climate, ClimateAdjustment, SeasonIntensity};
use crate::day_master::DayMasterStrength;
use crate::favorable::{derive_favorable_traditional, FavorableElementSet};
use crate::mediation::{analyze_mediation, MediationResult};
use crate::strength::ElementStrengthTable;
use bazi_common::config::{CLIMATE, MEDIATION, SUPPORT_SUPPRESS};
use bazi_common::{Chart, ElementCategory, Result, ScoringConfig, WeightProfile};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Per-element contributions and combined score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodScore {
    pub element: ElementCategory,
    /// Strategy name → unweighted contribution
    pub contributions: BTreeMap<String, f64>,
    pub combined: f64,
}

impl MethodScore {
    pub fn contribution(&self, strategy: &str) -> f64 {
        self.contributions.get(strategy).copied().unwrap_or(0.0)
    }

    pub fn support_suppress(&self) -> f64 {
        self.contribution(SUPPORT_SUPPRESS)
    }

    pub fn climate(&self) -> f64 {
        self.contribution(CLIMATE)
    }

    pub fn mediation(&self) -> f64 {
        self.contribution(MEDIATION)
    }
}

/// Output of the integrated scorer
#[derive(Debug, Clone, Serialize)]
pub struct IntegratedResult {
    pub favorable: FavorableElementSet,
    /// One per element, in enumeration order
    pub method_scores: Vec<MethodScore>,
    pub season: SeasonIntensity,
    pub weights: WeightProfile,
    pub contributions: Vec<MethodContribution>,
    /// Strategy carrying the largest weight in the chosen profile
    pub dominant_method: String,
    pub climate: ClimateAdjustment,
    pub mediation: MediationResult,
    pub notes: Vec<String>,
}

impl IntegratedResult {
    pub fn score_for(&self, element: ElementCategory) -> Option<&MethodScore> {
        self.method_scores.iter().find(|s| s.element == element)
    }
}

/// Weighted combinator over scoring strategies
pub struct IntegratedScorer {
    config: ScoringConfig,
    strategies: Vec<Box<dyn ScoringStrategy>>,
}

impl Default for IntegratedScorer {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
            strategies: default_strategies(),
        }
    }
}

impl IntegratedScorer {
    /// Validate `config` against the strategy names once, up front
    pub fn new(config: ScoringConfig, strategies: Vec<Box<dyn ScoringStrategy>>) -> Result<Self> {
        let names: Vec<&str> = strategies.iter().map(|s| s.name()).collect();
        config.validate(&names)?;
        Ok(Self { config, strategies })
    }

    pub fn with_config(config: ScoringConfig) -> Result<Self> {
        Self::new(config, default_strategies())
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn score(
        &self,
        chart: &Chart,
        strength: &DayMasterStrength,
        adjusted: &ElementStrengthTable,
    ) -> IntegratedResult {
        let self_element = chart.self_element();
        let climate = analyze_climate(chart.day_stem(), chart.month_branch());
        let season = climate.intensity;
        let weights = self.config.profile(season.is_extreme()).clone();

        let ctx = ScoringContext {
            chart,
            strength,
            adjusted,
            traditional: derive_favorable_traditional(self_element, strength),
            climate,
            mediation: analyze_mediation(adjusted),
        };

        let contributions: Vec<MethodContribution> =
            self.strategies.iter().map(|s| s.contribute(&ctx)).collect();

        let method_scores: Vec<MethodScore> = ElementCategory::all()
            .iter()
            .map(|&element| {
                let mut combined = 0.0;
                let mut parts = BTreeMap::new();
                for contribution in &contributions {
                    let value = contribution.score(element);
                    combined += weights.weight(&contribution.name).unwrap_or(0.0) * value;
                    parts.insert(contribution.name.clone(), value);
                }
                MethodScore {
                    element,
                    contributions: parts,
                    combined,
                }
            })
            .collect();

        let winner = argmax(&method_scores);
        let favorable = derive_from_winner(winner);
        let dominant_method = self.dominant_method(&weights);

        let mut notes = vec![format!(
            "{} season: weights {}",
            season,
            weights
                .iter()
                .map(|(k, v)| format!("{}={:.2}", k, v))
                .collect::<Vec<_>>()
                .join(", ")
        )];
        if let Some(element) = ctx.climate.primary_element() {
            notes.push(format!("climate favors {}", element));
        }
        for conflict in &ctx.mediation.conflicts {
            notes.push(format!(
                "{} overcomes {}, bridged by {} (severity {:.2})",
                conflict.attacker, conflict.defender, conflict.mediator, conflict.severity
            ));
        }
        if winner != ctx.traditional.primary_favorable {
            notes.push(format!(
                "primary favorable {} differs from traditional {}",
                winner, ctx.traditional.primary_favorable
            ));
        }

        debug!(
            "Integrated scores for {}: {:?}, winner {}",
            chart,
            method_scores.iter().map(|s| s.combined).collect::<Vec<_>>(),
            winner
        );

        IntegratedResult {
            favorable,
            method_scores,
            season,
            weights,
            contributions,
            dominant_method,
            climate: ctx.climate,
            mediation: ctx.mediation,
            notes,
        }
    }

    /// Largest weight in the profile; earlier strategies win ties
    fn dominant_method(&self, weights: &WeightProfile) -> String {
        let mut best: Option<(&str, f64)> = None;
        for strategy in &self.strategies {
            let weight = weights.weight(strategy.name()).unwrap_or(0.0);
            match best {
                Some((_, w)) if w >= weight => {}
                _ => best = Some((strategy.name(), weight)),
            }
        }
        best.map(|(name, _)| name.to_string()).unwrap_or_default()
    }
}

/// Highest combined score; earlier elements win ties
fn argmax(scores: &[MethodScore]) -> ElementCategory {
    let mut best: Option<&MethodScore> = None;
    for score in scores {
        match best {
            Some(b) if b.combined >= score.combined => {}
            _ => best = Some(score),
        }
    }
    best.map(|s| s.element).unwrap_or(ElementCategory::Wood)
}

/// Remaining roles follow the cycles from the winning element
pub fn derive_from_winner(winner: ElementCategory) -> FavorableElementSet {
    let primary_unfavorable = winner.overcome_by();
    FavorableElementSet::from_roles(
        winner,
        winner.generated_by(),
        primary_unfavorable,
        primary_unfavorable.generated_by(),
    )
}

/// Integrated favorability with the default configuration and strategies
pub fn derive_favorable_integrated(
    chart: &Chart,
    strength: &DayMasterStrength,
    adjusted: &ElementStrengthTable,
) -> IntegratedResult {
    IntegratedScorer::default().score(chart, strength, adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{ClimateStrategy, SupportSuppressStrategy};
    use bazi_common::Error;
    use ElementCategory::*;

    #[test]
    fn test_derive_from_winner_is_bijective() {
        for &winner in ElementCategory::all() {
            let set = derive_from_winner(winner);
            assert!(set.is_bijective());
            assert_eq!(set.neutral, winner.generates());
        }
        let set = derive_from_winner(Fire);
        assert_eq!(set.secondary_favorable, Wood);
        assert_eq!(set.primary_unfavorable, Water);
        assert_eq!(set.secondary_unfavorable, Metal);
        assert_eq!(set.neutral, Earth);
    }

    #[test]
    fn test_default_scorer_config_is_valid() {
        let scorer = IntegratedScorer::default();
        let names = scorer.strategy_names();
        assert!(scorer.config().validate(&names).is_ok());
        assert_eq!(names, vec![SUPPORT_SUPPRESS, CLIMATE, MEDIATION]);
    }

    #[test]
    fn test_construction_rejects_missing_strategy_weight() {
        // Only two strategies registered, profile names three
        let strategies: Vec<Box<dyn ScoringStrategy>> = vec![
            Box::new(SupportSuppressStrategy),
            Box::new(ClimateStrategy),
        ];
        let result = IntegratedScorer::new(ScoringConfig::default(), strategies);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_argmax_tie_breaks_by_enumeration() {
        let scores: Vec<MethodScore> = ElementCategory::all()
            .iter()
            .map(|&element| MethodScore {
                element,
                contributions: BTreeMap::new(),
                combined: if element == Fire || element == Water { 0.5 } else { 0.1 },
            })
            .collect();
        assert_eq!(argmax(&scores), Fire);
    }
}
