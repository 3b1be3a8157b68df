//! Stem and branch tokens
//!
//! Ten stem tokens map 1:1 onto (element × polarity). Twelve branch tokens
//! each carry a main element and a weighted set of hidden stems whose
//! ratios sum to 1.0.

use crate::elements::{ElementCategory, Polarity};
use crate::season::Season;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the ten stem tokens, in traditional order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StemToken {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

impl StemToken {
    pub fn all() -> &'static [StemToken; 10] {
        &[
            StemToken::Jia,
            StemToken::Yi,
            StemToken::Bing,
            StemToken::Ding,
            StemToken::Wu,
            StemToken::Ji,
            StemToken::Geng,
            StemToken::Xin,
            StemToken::Ren,
            StemToken::Gui,
        ]
    }

    pub fn element(self) -> ElementCategory {
        match self {
            StemToken::Jia | StemToken::Yi => ElementCategory::Wood,
            StemToken::Bing | StemToken::Ding => ElementCategory::Fire,
            StemToken::Wu | StemToken::Ji => ElementCategory::Earth,
            StemToken::Geng | StemToken::Xin => ElementCategory::Metal,
            StemToken::Ren | StemToken::Gui => ElementCategory::Water,
        }
    }

    pub fn polarity(self) -> Polarity {
        match self {
            StemToken::Jia
            | StemToken::Bing
            | StemToken::Wu
            | StemToken::Geng
            | StemToken::Ren => Polarity::Yang,
            StemToken::Yi
            | StemToken::Ding
            | StemToken::Ji
            | StemToken::Xin
            | StemToken::Gui => Polarity::Yin,
        }
    }

    /// The unique stem for an (element, polarity) combination
    pub fn from_parts(element: ElementCategory, polarity: Polarity) -> StemToken {
        let yang = polarity == Polarity::Yang;
        match element {
            ElementCategory::Wood => if yang { StemToken::Jia } else { StemToken::Yi },
            ElementCategory::Fire => if yang { StemToken::Bing } else { StemToken::Ding },
            ElementCategory::Earth => if yang { StemToken::Wu } else { StemToken::Ji },
            ElementCategory::Metal => if yang { StemToken::Geng } else { StemToken::Xin },
            ElementCategory::Water => if yang { StemToken::Ren } else { StemToken::Gui },
        }
    }

    pub fn chinese(self) -> &'static str {
        match self {
            StemToken::Jia => "甲",
            StemToken::Yi => "乙",
            StemToken::Bing => "丙",
            StemToken::Ding => "丁",
            StemToken::Wu => "戊",
            StemToken::Ji => "己",
            StemToken::Geng => "庚",
            StemToken::Xin => "辛",
            StemToken::Ren => "壬",
            StemToken::Gui => "癸",
        }
    }

    pub fn pinyin(self) -> &'static str {
        match self {
            StemToken::Jia => "jia",
            StemToken::Yi => "yi",
            StemToken::Bing => "bing",
            StemToken::Ding => "ding",
            StemToken::Wu => "wu",
            StemToken::Ji => "ji",
            StemToken::Geng => "geng",
            StemToken::Xin => "xin",
            StemToken::Ren => "ren",
            StemToken::Gui => "gui",
        }
    }
}

impl FromStr for StemToken {
    type Err = Error;

    /// Parse from Chinese character or pinyin (case insensitive)
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        StemToken::all()
            .iter()
            .copied()
            .find(|t| t.chinese() == trimmed || t.pinyin().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidToken(format!("unknown stem: {:?}", s)))
    }
}

impl std::fmt::Display for StemToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.chinese())
    }
}

/// Weighted stem latent within a branch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HiddenStem {
    pub stem: StemToken,
    pub ratio: f64,
}

/// One of the twelve branch tokens, in traditional order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BranchToken {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl BranchToken {
    pub fn all() -> &'static [BranchToken; 12] {
        &[
            BranchToken::Zi,
            BranchToken::Chou,
            BranchToken::Yin,
            BranchToken::Mao,
            BranchToken::Chen,
            BranchToken::Si,
            BranchToken::Wu,
            BranchToken::Wei,
            BranchToken::Shen,
            BranchToken::You,
            BranchToken::Xu,
            BranchToken::Hai,
        ]
    }

    /// Main element of the branch
    pub fn element(self) -> ElementCategory {
        match self {
            BranchToken::Zi | BranchToken::Hai => ElementCategory::Water,
            BranchToken::Yin | BranchToken::Mao => ElementCategory::Wood,
            BranchToken::Si | BranchToken::Wu => ElementCategory::Fire,
            BranchToken::Shen | BranchToken::You => ElementCategory::Metal,
            BranchToken::Chou | BranchToken::Chen | BranchToken::Wei | BranchToken::Xu => {
                ElementCategory::Earth
            }
        }
    }

    /// Hidden stems with their ratios (sum to 1.0)
    pub fn hidden_stems(self) -> &'static [HiddenStem] {
        use StemToken::*;
        match self {
            BranchToken::Zi => &[HiddenStem { stem: Gui, ratio: 1.0 }],
            BranchToken::Chou => &[
                HiddenStem { stem: Ji, ratio: 0.5 },
                HiddenStem { stem: Gui, ratio: 0.3 },
                HiddenStem { stem: Xin, ratio: 0.2 },
            ],
            BranchToken::Yin => &[
                HiddenStem { stem: Jia, ratio: 0.6 },
                HiddenStem { stem: Bing, ratio: 0.3 },
                HiddenStem { stem: Wu, ratio: 0.1 },
            ],
            BranchToken::Mao => &[HiddenStem { stem: Yi, ratio: 1.0 }],
            BranchToken::Chen => &[
                HiddenStem { stem: Wu, ratio: 0.5 },
                HiddenStem { stem: Yi, ratio: 0.3 },
                HiddenStem { stem: Gui, ratio: 0.2 },
            ],
            BranchToken::Si => &[
                HiddenStem { stem: Bing, ratio: 0.6 },
                HiddenStem { stem: Wu, ratio: 0.3 },
                HiddenStem { stem: Geng, ratio: 0.1 },
            ],
            BranchToken::Wu => &[
                HiddenStem { stem: Ding, ratio: 0.5 },
                HiddenStem { stem: Ji, ratio: 0.5 },
            ],
            BranchToken::Wei => &[
                HiddenStem { stem: Ji, ratio: 0.5 },
                HiddenStem { stem: Ding, ratio: 0.3 },
                HiddenStem { stem: Yi, ratio: 0.2 },
            ],
            BranchToken::Shen => &[
                HiddenStem { stem: Geng, ratio: 0.6 },
                HiddenStem { stem: Ren, ratio: 0.3 },
                HiddenStem { stem: Wu, ratio: 0.1 },
            ],
            BranchToken::You => &[HiddenStem { stem: Xin, ratio: 1.0 }],
            BranchToken::Xu => &[
                HiddenStem { stem: Wu, ratio: 0.5 },
                HiddenStem { stem: Xin, ratio: 0.3 },
                HiddenStem { stem: Ding, ratio: 0.2 },
            ],
            BranchToken::Hai => &[
                HiddenStem { stem: Ren, ratio: 0.7 },
                HiddenStem { stem: Jia, ratio: 0.3 },
            ],
        }
    }

    /// Season this branch belongs to when used as the month branch
    pub fn season(self) -> Season {
        match self {
            BranchToken::Yin | BranchToken::Mao | BranchToken::Chen => Season::Spring,
            BranchToken::Si | BranchToken::Wu | BranchToken::Wei => Season::Summer,
            BranchToken::Shen | BranchToken::You | BranchToken::Xu => Season::Autumn,
            BranchToken::Hai | BranchToken::Zi | BranchToken::Chou => Season::Winter,
        }
    }

    /// Position in traditional order (0..12)
    pub fn index(self) -> usize {
        match self {
            BranchToken::Zi => 0,
            BranchToken::Chou => 1,
            BranchToken::Yin => 2,
            BranchToken::Mao => 3,
            BranchToken::Chen => 4,
            BranchToken::Si => 5,
            BranchToken::Wu => 6,
            BranchToken::Wei => 7,
            BranchToken::Shen => 8,
            BranchToken::You => 9,
            BranchToken::Xu => 10,
            BranchToken::Hai => 11,
        }
    }

    pub fn chinese(self) -> &'static str {
        match self {
            BranchToken::Zi => "子",
            BranchToken::Chou => "丑",
            BranchToken::Yin => "寅",
            BranchToken::Mao => "卯",
            BranchToken::Chen => "辰",
            BranchToken::Si => "巳",
            BranchToken::Wu => "午",
            BranchToken::Wei => "未",
            BranchToken::Shen => "申",
            BranchToken::You => "酉",
            BranchToken::Xu => "戌",
            BranchToken::Hai => "亥",
        }
    }

    pub fn pinyin(self) -> &'static str {
        match self {
            BranchToken::Zi => "zi",
            BranchToken::Chou => "chou",
            BranchToken::Yin => "yin",
            BranchToken::Mao => "mao",
            BranchToken::Chen => "chen",
            BranchToken::Si => "si",
            BranchToken::Wu => "wu",
            BranchToken::Wei => "wei",
            BranchToken::Shen => "shen",
            BranchToken::You => "you",
            BranchToken::Xu => "xu",
            BranchToken::Hai => "hai",
        }
    }
}

impl FromStr for BranchToken {
    type Err = Error;

    /// Parse from Chinese character or pinyin (case insensitive)
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        BranchToken::all()
            .iter()
            .copied()
            .find(|t| t.chinese() == trimmed || t.pinyin().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidToken(format!("unknown branch: {:?}", s)))
    }
}

impl std::fmt::Display for BranchToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.chinese())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_stems_cover_every_element_polarity_once() {
        let combos: HashSet<_> = StemToken::all()
            .iter()
            .map(|s| (s.element(), s.polarity()))
            .collect();
        assert_eq!(combos.len(), 10);

        for &stem in StemToken::all() {
            assert_eq!(StemToken::from_parts(stem.element(), stem.polarity()), stem);
        }
    }

    #[test]
    fn test_hidden_stem_ratios_sum_to_one() {
        for &branch in BranchToken::all() {
            let stems = branch.hidden_stems();
            assert!(!stems.is_empty(), "{:?} has no hidden stems", branch);
            let sum: f64 = stems.iter().map(|h| h.ratio).sum();
            assert!(
                (sum - 1.0).abs() <= 0.01,
                "{:?} hidden ratios sum to {}",
                branch,
                sum
            );
        }
    }

    #[test]
    fn test_main_element_stem_has_largest_weight() {
        for &branch in BranchToken::all() {
            let stems = branch.hidden_stems();
            let main = stems
                .iter()
                .filter(|h| h.stem.element() == branch.element())
                .map(|h| h.ratio)
                .fold(0.0_f64, f64::max);
            let max = stems.iter().map(|h| h.ratio).fold(0.0_f64, f64::max);
            assert!(main > 0.0, "{:?} lacks a main-element hidden stem", branch);
            assert!(main >= max, "{:?} main stem is not the heaviest", branch);
        }
    }

    #[test]
    fn test_seasons_have_three_branches_each() {
        for season in [Season::Spring, Season::Summer, Season::Autumn, Season::Winter] {
            let count = BranchToken::all().iter().filter(|b| b.season() == season).count();
            assert_eq!(count, 3, "{:?}", season);
        }
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!("甲".parse::<StemToken>().unwrap(), StemToken::Jia);
        assert_eq!("Gui".parse::<StemToken>().unwrap(), StemToken::Gui);
        assert_eq!("子".parse::<BranchToken>().unwrap(), BranchToken::Zi);
        assert_eq!("hai".parse::<BranchToken>().unwrap(), BranchToken::Hai);
        assert!(matches!("子".parse::<StemToken>(), Err(Error::InvalidToken(_))));
        assert!(matches!("".parse::<BranchToken>(), Err(Error::InvalidToken(_))));
    }

    #[test]
    fn test_index_matches_order() {
        for (i, branch) in BranchToken::all().iter().enumerate() {
            assert_eq!(branch.index(), i, "{}", branch);
        }
    }
}
