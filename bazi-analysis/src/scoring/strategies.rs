//! Built-in scoring strategies

use super::{MethodContribution, ScoringContext, ScoringStrategy};
use bazi_common::config::{CLIMATE, MEDIATION, SUPPORT_SUPPRESS};
use bazi_common::ElementCategory;
use serde_json::json;

/// ±1 from the traditional favorable/unfavorable roles
#[derive(Debug, Default, Clone, Copy)]
pub struct SupportSuppressStrategy;

impl ScoringStrategy for SupportSuppressStrategy {
    fn name(&self) -> &'static str {
        SUPPORT_SUPPRESS
    }

    fn contribute(&self, ctx: &ScoringContext<'_>) -> MethodContribution {
        let mut scores = [0.0; 5];
        for (role, element) in ctx.traditional.iter() {
            scores[element.index()] = role.sign();
        }
        MethodContribution::new(self.name(), scores)
            .with_metadata("dominant", json!(ctx.strength.is_dominant()))
            .with_metadata("percentage", json!(ctx.strength.percentage()))
    }
}

/// +1 for elements of the primary climate stems
#[derive(Debug, Default, Clone, Copy)]
pub struct ClimateStrategy;

impl ScoringStrategy for ClimateStrategy {
    fn name(&self) -> &'static str {
        CLIMATE
    }

    fn contribute(&self, ctx: &ScoringContext<'_>) -> MethodContribution {
        let mut scores = [0.0; 5];
        for element in ctx.climate.primary_elements() {
            scores[element.index()] = 1.0;
        }
        let primary: Vec<&str> = ctx.climate.primary.iter().map(|s| s.chinese()).collect();
        MethodContribution::new(self.name(), scores)
            .with_metadata("intensity", json!(ctx.climate.intensity.label()))
            .with_metadata("urgency", json!(ctx.climate.urgency))
            .with_metadata("primary_stems", json!(primary))
    }
}

/// Normalized bridge-element scores
#[derive(Debug, Default, Clone, Copy)]
pub struct MediationStrategy;

impl ScoringStrategy for MediationStrategy {
    fn name(&self) -> &'static str {
        MEDIATION
    }

    fn contribute(&self, ctx: &ScoringContext<'_>) -> MethodContribution {
        MethodContribution::new(self.name(), ctx.mediation.scores)
            .with_metadata("has_conflict", json!(ctx.mediation.has_conflict))
            .with_metadata("conflict_count", json!(ctx.mediation.conflicts.len()))
            .with_metadata(
                "primary_mediator",
                json!(ctx.mediation.primary_mediator.map(ElementCategory::display_name)),
            )
    }
}

/// Support-suppress, climate and mediation, in that order
pub fn default_strategies() -> Vec<Box<dyn ScoringStrategy>> {
    vec![
        Box::new(SupportSuppressStrategy),
        Box::new(ClimateStrategy),
        Box::new(MediationStrategy),
    ]
}
