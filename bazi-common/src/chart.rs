//! Pillars and charts
//!
//! A chart is four (stem, branch) pillars at fixed positions. The day
//! pillar's stem is the self reference for all later analysis.

use crate::elements::{ElementCategory, Polarity};
use crate::tokens::{BranchToken, StemToken};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Chronological slot of a pillar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

impl PillarPosition {
    pub fn all() -> &'static [PillarPosition; 4] {
        &[
            PillarPosition::Year,
            PillarPosition::Month,
            PillarPosition::Day,
            PillarPosition::Hour,
        ]
    }

    /// Slot index 0..4
    pub fn index(self) -> usize {
        match self {
            PillarPosition::Year => 0,
            PillarPosition::Month => 1,
            PillarPosition::Day => 2,
            PillarPosition::Hour => 3,
        }
    }

    /// Number of slots between two positions (1..=3 for distinct positions)
    pub fn distance(self, other: PillarPosition) -> usize {
        self.index().abs_diff(other.index())
    }
}

impl std::fmt::Display for PillarPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PillarPosition::Year => "year",
            PillarPosition::Month => "month",
            PillarPosition::Day => "day",
            PillarPosition::Hour => "hour",
        };
        write!(f, "{}", name)
    }
}

/// A (stem, branch) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: StemToken,
    pub branch: BranchToken,
}

impl Pillar {
    pub fn new(stem: StemToken, branch: BranchToken) -> Self {
        Self { stem, branch }
    }
}

impl FromStr for Pillar {
    type Err = Error;

    /// Parse a two-character pillar such as "甲子"
    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 2 {
            return Err(Error::MalformedChart(format!(
                "pillar must be two characters, got {:?}",
                s
            )));
        }
        let stem: StemToken = chars[0].to_string().parse()?;
        let branch: BranchToken = chars[1].to_string().parse()?;
        Ok(Pillar::new(stem, branch))
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// Four pillars in year, month, day, hour order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chart {
    pillars: [Pillar; 4],
}

impl Chart {
    pub fn new(year: Pillar, month: Pillar, day: Pillar, hour: Pillar) -> Self {
        Self {
            pillars: [year, month, day, hour],
        }
    }

    /// Build from exactly four pillar strings
    pub fn from_pillar_strs(pillars: &[&str]) -> Result<Self> {
        if pillars.len() != 4 {
            return Err(Error::MalformedChart(format!(
                "expected 4 pillars, got {}",
                pillars.len()
            )));
        }
        let parsed = pillars
            .iter()
            .map(|p| p.parse::<Pillar>())
            .collect::<Result<Vec<_>>>()?;
        Ok(Chart::new(parsed[0], parsed[1], parsed[2], parsed[3]))
    }

    pub fn pillars(&self) -> &[Pillar; 4] {
        &self.pillars
    }

    pub fn pillar(&self, position: PillarPosition) -> Pillar {
        self.pillars[position.index()]
    }

    pub fn stems(&self) -> [StemToken; 4] {
        self.pillars.map(|p| p.stem)
    }

    pub fn branches(&self) -> [BranchToken; 4] {
        self.pillars.map(|p| p.branch)
    }

    pub fn day_stem(&self) -> StemToken {
        self.pillar(PillarPosition::Day).stem
    }

    pub fn month_branch(&self) -> BranchToken {
        self.pillar(PillarPosition::Month).branch
    }

    pub fn self_element(&self) -> ElementCategory {
        self.day_stem().element()
    }

    pub fn self_polarity(&self) -> Polarity {
        self.day_stem().polarity()
    }

    /// Unweighted occurrence count of each element across stems and main
    /// branch elements, indexed by enumeration order
    pub fn element_count(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for pillar in &self.pillars {
            counts[pillar.stem.element().index()] += 1;
            counts[pillar.branch.element().index()] += 1;
        }
        counts
    }

    pub fn contains_all_elements(&self) -> bool {
        self.element_count().iter().all(|&c| c > 0)
    }
}

impl FromStr for Chart {
    type Err = Error;

    /// Parse eight characters, whitespace ignored: "甲子 丙寅 戊辰 庚午"
    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 8 {
            return Err(Error::MalformedChart(format!(
                "expected 8 stem/branch characters, got {}",
                chars.len()
            )));
        }
        let pillars: Vec<String> = chars.chunks(2).map(|c| c.iter().collect()).collect();
        let refs: Vec<&str> = pillars.iter().map(String::as_str).collect();
        Chart::from_pillar_strs(&refs)
    }
}

impl std::fmt::Display for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [y, m, d, h] = &self.pillars;
        write!(f, "{} {} {} {}", y, m, d, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chart() {
        let chart: Chart = "甲子 丙寅 戊辰 庚午".parse().unwrap();
        assert_eq!(chart.pillar(PillarPosition::Year).stem, StemToken::Jia);
        assert_eq!(chart.month_branch(), BranchToken::Yin);
        assert_eq!(chart.self_element(), ElementCategory::Earth);
        assert_eq!(chart.self_polarity(), Polarity::Yang);
        assert_eq!(chart.to_string(), "甲子 丙寅 戊辰 庚午");
    }

    #[test]
    fn test_parse_without_whitespace() {
        let a: Chart = "甲子丙寅戊辰庚午".parse().unwrap();
        let b: Chart = "甲子 丙寅 戊辰 庚午".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_malformed_chart() {
        assert!(matches!("甲子 丙寅 戊辰".parse::<Chart>(), Err(Error::MalformedChart(_))));
        assert!(matches!(
            Chart::from_pillar_strs(&["甲子", "丙寅", "戊辰", "庚午", "壬申"]),
            Err(Error::MalformedChart(_))
        ));
        assert!(matches!("甲".parse::<Pillar>(), Err(Error::MalformedChart(_))));
    }

    #[test]
    fn test_invalid_token_in_chart() {
        // 子 in stem slot
        assert!(matches!("子甲 丙寅 戊辰 庚午".parse::<Chart>(), Err(Error::InvalidToken(_))));
    }

    #[test]
    fn test_element_count() {
        let chart: Chart = "甲子 丙寅 戊辰 庚午".parse().unwrap();
        let counts = chart.element_count();
        assert_eq!(counts.iter().sum::<usize>(), 8);
        assert_eq!(counts[ElementCategory::Earth.index()], 2);
        assert!(chart.contains_all_elements());

        let wood: Chart = "甲寅 甲寅 甲寅 甲寅".parse().unwrap();
        assert!(!wood.contains_all_elements());
    }

    #[test]
    fn test_distance() {
        assert_eq!(PillarPosition::Year.distance(PillarPosition::Hour), 3);
        assert_eq!(PillarPosition::Day.distance(PillarPosition::Month), 1);
    }
}
