//! Climate adjustment scorer
//!
//! Looks up the stems that temper the season for a given day stem born in
//! a given month. Cold months favor warming stems, hot months favor
//! moistening ones. The month branch also sets how urgent the adjustment is.

use bazi_common::{BranchToken, ElementCategory, StemToken};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use BranchToken as B;
use StemToken as S;

/// Temperature character of the month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeasonIntensity {
    ExtremeCold,
    Cold,
    ExtremeHot,
    Hot,
    Moderate,
}

impl SeasonIntensity {
    /// 子丑 extreme cold, 亥 cold, 午未 extreme hot, 巳 hot, rest moderate
    pub fn from_month(month_branch: BranchToken) -> SeasonIntensity {
        match month_branch {
            B::Zi | B::Chou => SeasonIntensity::ExtremeCold,
            B::Hai => SeasonIntensity::Cold,
            B::Wu | B::Wei => SeasonIntensity::ExtremeHot,
            B::Si => SeasonIntensity::Hot,
            _ => SeasonIntensity::Moderate,
        }
    }

    /// 2 for extreme, 1 for cold/hot, 0 for moderate
    pub fn level(self) -> u8 {
        match self {
            SeasonIntensity::ExtremeCold | SeasonIntensity::ExtremeHot => 2,
            SeasonIntensity::Cold | SeasonIntensity::Hot => 1,
            SeasonIntensity::Moderate => 0,
        }
    }

    pub fn urgency(self) -> f64 {
        match self.level() {
            2 => 0.9,
            1 => 0.6,
            _ => 0.3,
        }
    }

    pub fn is_extreme(self) -> bool {
        self.level() == 2
    }

    pub fn label(self) -> &'static str {
        match self {
            SeasonIntensity::ExtremeCold => "extreme-cold",
            SeasonIntensity::Cold => "cold",
            SeasonIntensity::ExtremeHot => "extreme-hot",
            SeasonIntensity::Hot => "hot",
            SeasonIntensity::Moderate => "moderate",
        }
    }
}

impl std::fmt::Display for SeasonIntensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Climate lookup result for one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateAdjustment {
    pub day_stem: StemToken,
    pub month_branch: BranchToken,
    pub intensity: SeasonIntensity,
    /// Favored stems in priority order
    pub primary: Vec<StemToken>,
    pub secondary: Vec<StemToken>,
    /// 0.9 extreme, 0.6 cold/hot, 0.3 moderate
    pub urgency: f64,
}

impl ClimateAdjustment {
    /// Element of the highest-priority primary stem
    pub fn primary_element(&self) -> Option<ElementCategory> {
        self.primary.first().map(|s| s.element())
    }

    /// Elements of every primary stem, deduplicated, in priority order
    pub fn primary_elements(&self) -> Vec<ElementCategory> {
        let mut out = Vec::new();
        for stem in &self.primary {
            let element = stem.element();
            if !out.contains(&element) {
                out.push(element);
            }
        }
        out
    }

    pub fn needs_adjustment(&self) -> bool {
        self.intensity.is_extreme()
    }
}

type ClimateRow = (StemToken, BranchToken, &'static [StemToken], &'static [StemToken]);

const CLIMATE_ROWS: &[ClimateRow] = &[
    // 甲
    (S::Jia, B::Yin, &[S::Bing], &[S::Gui]),
    (S::Jia, B::Mao, &[S::Geng], &[S::Bing, S::Ding, S::Wu, S::Ji]),
    (S::Jia, B::Chen, &[S::Geng, S::Ding], &[S::Ren]),
    (S::Jia, B::Si, &[S::Gui], &[S::Geng, S::Ding]),
    (S::Jia, B::Wu, &[S::Gui], &[S::Geng, S::Ding]),
    (S::Jia, B::Wei, &[S::Gui], &[S::Geng, S::Ding]),
    (S::Jia, B::Shen, &[S::Geng, S::Ding], &[S::Ren]),
    (S::Jia, B::You, &[S::Geng, S::Ding], &[S::Bing]),
    (S::Jia, B::Xu, &[S::Geng, S::Jia], &[S::Ding, S::Ren, S::Gui]),
    (S::Jia, B::Hai, &[S::Geng, S::Ding], &[S::Bing, S::Wu]),
    (S::Jia, B::Zi, &[S::Ding], &[S::Geng, S::Bing]),
    (S::Jia, B::Chou, &[S::Ding], &[S::Geng, S::Bing]),
    // 乙
    (S::Yi, B::Yin, &[S::Bing], &[S::Gui]),
    (S::Yi, B::Mao, &[S::Bing], &[S::Gui]),
    (S::Yi, B::Chen, &[S::Gui], &[S::Bing, S::Wu]),
    (S::Yi, B::Si, &[S::Gui], &[]),
    (S::Yi, B::Wu, &[S::Gui], &[S::Bing]),
    (S::Yi, B::Wei, &[S::Gui], &[S::Bing]),
    (S::Yi, B::Shen, &[S::Bing, S::Gui], &[S::Ji]),
    (S::Yi, B::You, &[S::Gui], &[S::Bing, S::Ding]),
    (S::Yi, B::Xu, &[S::Gui], &[S::Xin]),
    (S::Yi, B::Hai, &[S::Bing], &[S::Wu]),
    (S::Yi, B::Zi, &[S::Bing], &[]),
    (S::Yi, B::Chou, &[S::Bing], &[]),
    // 丙
    (S::Bing, B::Yin, &[S::Ren], &[S::Geng]),
    (S::Bing, B::Mao, &[S::Ren], &[S::Ji]),
    (S::Bing, B::Chen, &[S::Ren], &[S::Jia]),
    (S::Bing, B::Si, &[S::Ren, S::Gui], &[S::Geng]),
    (S::Bing, B::Wu, &[S::Ren], &[S::Geng]),
    (S::Bing, B::Wei, &[S::Ren], &[S::Geng]),
    (S::Bing, B::Shen, &[S::Ren], &[S::Wu]),
    (S::Bing, B::You, &[S::Ren], &[S::Gui]),
    (S::Bing, B::Xu, &[S::Jia], &[S::Ren]),
    (S::Bing, B::Hai, &[S::Jia], &[S::Wu, S::Geng, S::Ren]),
    (S::Bing, B::Zi, &[S::Ren], &[S::Wu, S::Ji]),
    (S::Bing, B::Chou, &[S::Ren], &[S::Jia]),
    // 丁
    (S::Ding, B::Yin, &[S::Jia], &[S::Geng]),
    (S::Ding, B::Mao, &[S::Geng], &[S::Jia]),
    (S::Ding, B::Chen, &[S::Jia], &[S::Geng]),
    (S::Ding, B::Si, &[S::Jia], &[S::Geng]),
    (S::Ding, B::Wu, &[S::Ren], &[S::Geng, S::Gui]),
    (S::Ding, B::Wei, &[S::Jia], &[S::Ren, S::Geng]),
    (S::Ding, B::Shen, &[S::Jia, S::Geng], &[S::Bing, S::Wu]),
    (S::Ding, B::You, &[S::Jia, S::Geng], &[S::Bing, S::Wu]),
    (S::Ding, B::Xu, &[S::Jia, S::Geng], &[S::Wu]),
    (S::Ding, B::Hai, &[S::Jia], &[S::Geng]),
    (S::Ding, B::Zi, &[S::Jia], &[S::Geng]),
    (S::Ding, B::Chou, &[S::Jia], &[S::Geng]),
    // 戊
    (S::Wu, B::Yin, &[S::Bing], &[S::Jia, S::Gui]),
    (S::Wu, B::Mao, &[S::Bing], &[S::Jia, S::Gui]),
    (S::Wu, B::Chen, &[S::Jia], &[S::Bing, S::Gui]),
    (S::Wu, B::Si, &[S::Jia], &[S::Bing, S::Gui]),
    (S::Wu, B::Wu, &[S::Ren], &[S::Jia, S::Bing]),
    (S::Wu, B::Wei, &[S::Gui], &[S::Bing, S::Jia]),
    (S::Wu, B::Shen, &[S::Bing], &[S::Gui, S::Jia]),
    (S::Wu, B::You, &[S::Bing], &[S::Gui]),
    (S::Wu, B::Xu, &[S::Jia], &[S::Bing, S::Gui]),
    (S::Wu, B::Hai, &[S::Jia, S::Bing], &[]),
    (S::Wu, B::Zi, &[S::Bing], &[S::Jia]),
    (S::Wu, B::Chou, &[S::Bing], &[S::Jia]),
    // 己
    (S::Ji, B::Yin, &[S::Bing], &[S::Geng, S::Jia]),
    (S::Ji, B::Mao, &[S::Jia], &[S::Gui, S::Bing]),
    (S::Ji, B::Chen, &[S::Bing], &[S::Gui, S::Jia]),
    (S::Ji, B::Si, &[S::Gui], &[S::Bing]),
    (S::Ji, B::Wu, &[S::Gui], &[S::Bing]),
    (S::Ji, B::Wei, &[S::Gui], &[S::Bing]),
    (S::Ji, B::Shen, &[S::Bing], &[S::Gui]),
    (S::Ji, B::You, &[S::Bing], &[S::Gui]),
    (S::Ji, B::Xu, &[S::Jia], &[S::Bing, S::Gui]),
    (S::Ji, B::Hai, &[S::Bing], &[S::Jia, S::Wu]),
    (S::Ji, B::Zi, &[S::Bing], &[S::Jia, S::Wu]),
    (S::Ji, B::Chou, &[S::Bing], &[S::Jia, S::Wu]),
    // 庚
    (S::Geng, B::Yin, &[S::Wu], &[S::Jia, S::Ren, S::Bing, S::Ding]),
    (S::Geng, B::Mao, &[S::Ding], &[S::Jia, S::Geng, S::Bing]),
    (S::Geng, B::Chen, &[S::Jia, S::Ding], &[S::Ren, S::Gui]),
    (S::Geng, B::Si, &[S::Ren], &[S::Wu, S::Bing, S::Ding]),
    (S::Geng, B::Wu, &[S::Ren], &[S::Gui]),
    (S::Geng, B::Wei, &[S::Ding], &[S::Jia]),
    (S::Geng, B::Shen, &[S::Ding], &[S::Jia]),
    (S::Geng, B::You, &[S::Ding], &[S::Jia, S::Bing]),
    (S::Geng, B::Xu, &[S::Jia], &[S::Ren]),
    (S::Geng, B::Hai, &[S::Ding, S::Bing], &[]),
    (S::Geng, B::Zi, &[S::Ding], &[S::Jia, S::Bing]),
    (S::Geng, B::Chou, &[S::Bing, S::Ding], &[S::Jia]),
    // 辛
    (S::Xin, B::Yin, &[S::Ji], &[S::Ren, S::Geng]),
    (S::Xin, B::Mao, &[S::Ren], &[S::Jia]),
    (S::Xin, B::Chen, &[S::Ren], &[S::Jia]),
    (S::Xin, B::Si, &[S::Ren], &[S::Jia, S::Gui]),
    (S::Xin, B::Wu, &[S::Ren, S::Ji], &[S::Gui]),
    (S::Xin, B::Wei, &[S::Ren], &[S::Geng, S::Jia]),
    (S::Xin, B::Shen, &[S::Ren], &[S::Jia, S::Wu]),
    (S::Xin, B::You, &[S::Ren], &[S::Jia]),
    (S::Xin, B::Xu, &[S::Ren], &[S::Jia]),
    (S::Xin, B::Hai, &[S::Ren], &[S::Bing]),
    (S::Xin, B::Zi, &[S::Bing], &[S::Wu, S::Ren]),
    (S::Xin, B::Chou, &[S::Bing], &[S::Ren, S::Wu, S::Ji]),
    // 壬
    (S::Ren, B::Yin, &[S::Wu], &[S::Jia, S::Bing]),
    (S::Ren, B::Mao, &[S::Wu], &[S::Xin, S::Geng]),
    (S::Ren, B::Chen, &[S::Jia], &[S::Geng]),
    (S::Ren, B::Si, &[S::Ren], &[S::Xin, S::Geng, S::Gui]),
    (S::Ren, B::Wu, &[S::Gui], &[S::Geng, S::Xin]),
    (S::Ren, B::Wei, &[S::Xin], &[S::Jia]),
    (S::Ren, B::Shen, &[S::Wu], &[S::Ding]),
    (S::Ren, B::You, &[S::Jia], &[S::Geng]),
    (S::Ren, B::Xu, &[S::Jia], &[S::Bing, S::Wu]),
    (S::Ren, B::Hai, &[S::Wu], &[S::Bing, S::Geng]),
    (S::Ren, B::Zi, &[S::Wu], &[S::Bing]),
    (S::Ren, B::Chou, &[S::Bing, S::Ding], &[S::Jia]),
    // 癸
    (S::Gui, B::Yin, &[S::Xin], &[S::Bing]),
    (S::Gui, B::Mao, &[S::Geng, S::Xin], &[]),
    (S::Gui, B::Chen, &[S::Jia], &[S::Geng]),
    (S::Gui, B::Si, &[S::Xin], &[]),
    (S::Gui, B::Wu, &[S::Geng, S::Xin], &[S::Ren, S::Gui]),
    (S::Gui, B::Wei, &[S::Geng, S::Xin], &[S::Ren, S::Gui]),
    (S::Gui, B::Shen, &[S::Ding], &[]),
    (S::Gui, B::You, &[S::Xin], &[S::Bing]),
    (S::Gui, B::Xu, &[S::Xin], &[S::Jia, S::Ren, S::Gui]),
    (S::Gui, B::Hai, &[S::Geng, S::Xin], &[S::Wu, S::Ding]),
    (S::Gui, B::Zi, &[S::Bing], &[S::Xin]),
    (S::Gui, B::Chou, &[S::Bing, S::Ding], &[]),
];

type FavoredStems = (&'static [StemToken], &'static [StemToken]);

const NO_ENTRY: FavoredStems = (&[], &[]);

static CLIMATE_TABLE: Lazy<HashMap<(StemToken, BranchToken), FavoredStems>> = Lazy::new(|| {
    CLIMATE_ROWS
        .iter()
        .map(|&(stem, branch, primary, secondary)| ((stem, branch), (primary, secondary)))
        .collect()
});

/// Favored (primary, secondary) stems for a day stem and month; empty when
/// the table has no entry
pub fn favored_stems(day_stem: StemToken, month_branch: BranchToken) -> FavoredStems {
    CLIMATE_TABLE
        .get(&(day_stem, month_branch))
        .copied()
        .unwrap_or(NO_ENTRY)
}

/// Climate adjustment for a day stem born in a month
pub fn analyze_climate(day_stem: StemToken, month_branch: BranchToken) -> ClimateAdjustment {
    let intensity = SeasonIntensity::from_month(month_branch);
    let (primary, secondary) = favored_stems(day_stem, month_branch);

    debug!(
        "Climate for {} in {} month: {} (primary: {:?}, secondary: {:?})",
        day_stem, month_branch, intensity, primary, secondary
    );

    ClimateAdjustment {
        day_stem,
        month_branch,
        intensity,
        primary: primary.to_vec(),
        secondary: secondary.to_vec(),
        urgency: intensity.urgency(),
    }
}
