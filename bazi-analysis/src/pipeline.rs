//! Full-chart pipeline
//!
//! Runs every stage in order and returns one owned aggregate. The calendar
//! oracle is only consulted by [`ChartAnalyzer::analyze_moment`].

use crate::day_master::{classify_day_master, DayMasterStrength};
use crate::favorable::{derive_favorable_traditional, FavorableElementSet};
use crate::relations::{analyze_relations, RelationsReport};
use crate::scoring::{IntegratedResult, IntegratedScorer};
use crate::strength::{calculate_strength, StrengthAnalysis};
use bazi_common::{CalendarOracle, Chart, Error, Result, ScoringConfig};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

/// Everything derived from one chart
#[derive(Debug, Clone, Serialize)]
pub struct ChartAnalysis {
    pub chart: Chart,
    pub earth_dominant: bool,
    pub relations: RelationsReport,
    pub strength: StrengthAnalysis,
    pub day_master: DayMasterStrength,
    pub traditional: FavorableElementSet,
    pub integrated: IntegratedResult,
}

/// Pipeline bound to one validated scorer
#[derive(Default)]
pub struct ChartAnalyzer {
    scorer: IntegratedScorer,
}

impl ChartAnalyzer {
    pub fn new(scorer: IntegratedScorer) -> Self {
        Self { scorer }
    }

    /// Build with a custom configuration, validated here once
    pub fn with_config(config: ScoringConfig) -> Result<Self> {
        Ok(Self::new(IntegratedScorer::with_config(config)?))
    }

    pub fn analyze(&self, chart: &Chart, earth_dominant: bool) -> ChartAnalysis {
        let relations = analyze_relations(chart);
        let strength = calculate_strength(chart, earth_dominant, &relations);
        let self_element = chart.self_element();
        let day_master = classify_day_master(&strength.adjusted, self_element);
        let traditional = derive_favorable_traditional(self_element, &day_master);
        let integrated = self.scorer.score(chart, &day_master, &strength.adjusted);

        info!(
            "Analyzed {}: self {} {} ({:.1}%), favorable {} (traditional {}), {} season",
            chart,
            self_element,
            day_master.label(),
            day_master.percentage(),
            integrated.favorable.primary_favorable,
            traditional.primary_favorable,
            integrated.season
        );

        ChartAnalysis {
            chart: *chart,
            earth_dominant,
            relations,
            strength,
            day_master,
            traditional,
            integrated,
        }
    }

    /// Fetch chart inputs from the oracle, then analyze
    pub fn analyze_moment<O>(&self, oracle: &O, at: NaiveDateTime) -> Result<ChartAnalysis>
    where
        O: CalendarOracle + ?Sized,
    {
        let chart = oracle.four_pillars(at).map_err(Error::Oracle)?;
        let earth_dominant = oracle.is_earth_dominant(at).map_err(Error::Oracle)?;
        debug!("Oracle chart for {}: {} (earth dominant: {})", at, chart, earth_dominant);
        Ok(self.analyze(&chart, earth_dominant))
    }
}

/// Analyze a chart with the default scoring configuration
pub fn analyze_chart(chart: &Chart, earth_dominant: bool) -> ChartAnalysis {
    ChartAnalyzer::default().analyze(chart, earth_dominant)
}

/// Analyze the chart an oracle supplies for a moment
pub fn analyze_moment<O>(oracle: &O, at: NaiveDateTime) -> Result<ChartAnalysis>
where
    O: CalendarOracle + ?Sized,
{
    ChartAnalyzer::default().analyze_moment(oracle, at)
}
