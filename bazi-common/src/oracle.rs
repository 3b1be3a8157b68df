//! Calendar oracle interface
//!
//! Date-to-chart conversion lives outside this workspace. Adapters
//! implement [`CalendarOracle`]; the analysis pipeline depends only on the
//! trait.

use crate::chart::Chart;
use crate::tokens::BranchToken;
use chrono::NaiveDateTime;

/// Supplies chart inputs for a moment in time
pub trait CalendarOracle {
    /// The four pillars for a moment
    fn four_pillars(&self, at: NaiveDateTime) -> anyhow::Result<Chart>;

    /// Whether earth governs the season at this moment
    fn is_earth_dominant(&self, at: NaiveDateTime) -> anyhow::Result<bool>;

    /// Month branch used for climate lookups
    fn month_branch(&self, at: NaiveDateTime) -> anyhow::Result<BranchToken> {
        Ok(self.four_pillars(at)?.month_branch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct FixedOracle(Chart);

    impl CalendarOracle for FixedOracle {
        fn four_pillars(&self, _at: NaiveDateTime) -> anyhow::Result<Chart> {
            Ok(self.0)
        }

        fn is_earth_dominant(&self, _at: NaiveDateTime) -> anyhow::Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn test_default_month_branch() {
        let chart: Chart = "甲子 丙寅 戊辰 庚午".parse().unwrap();
        let oracle = FixedOracle(chart);
        let at = NaiveDate::from_ymd_opt(1984, 2, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(oracle.month_branch(at).unwrap(), BranchToken::Yin);
    }
}
