//! Seasons and seasonal phases
//!
//! The month branch places the chart in one of four seasons. Each season
//! assigns every element a phase, and each phase carries a strength
//! multiplier. Vault months with an earth-dominant flag switch to the
//! special earth-prosperous assignment.

use crate::elements::ElementCategory;
use crate::tokens::BranchToken;
use serde::{Deserialize, Serialize};

/// Phase of an element within a season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonalPhase {
    Prosperous,
    Prime,
    Rest,
    Imprisoned,
    Dead,
}

impl SeasonalPhase {
    pub fn multiplier(self) -> f64 {
        match self {
            SeasonalPhase::Prosperous | SeasonalPhase::Prime => 1.2,
            SeasonalPhase::Rest => 1.0,
            SeasonalPhase::Imprisoned | SeasonalPhase::Dead => 0.8,
        }
    }

    pub fn chinese(self) -> &'static str {
        match self {
            SeasonalPhase::Prosperous => "旺",
            SeasonalPhase::Prime => "相",
            SeasonalPhase::Rest => "休",
            SeasonalPhase::Imprisoned => "囚",
            SeasonalPhase::Dead => "死",
        }
    }
}

/// Season used for phase assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    /// Vault month with earth-dominant flag set
    EarthProsperous,
}

impl Season {
    /// Resolve the season for a month branch
    pub fn for_month(month_branch: BranchToken, earth_dominant: bool) -> Season {
        if earth_dominant && is_vault(month_branch) {
            Season::EarthProsperous
        } else {
            month_branch.season()
        }
    }

    /// The element at its peak in this season
    pub fn prosperous_element(self) -> ElementCategory {
        match self {
            Season::Spring => ElementCategory::Wood,
            Season::Summer => ElementCategory::Fire,
            Season::Autumn => ElementCategory::Metal,
            Season::Winter => ElementCategory::Water,
            Season::EarthProsperous => ElementCategory::Earth,
        }
    }

    /// Phase of an element in this season
    ///
    /// The prosperous element is followed around the generation cycle by
    /// prime, then the element overcoming the prosperous one is imprisoned
    /// and the element the prosperous one overcomes is dead. The generator
    /// of the prosperous element rests.
    pub fn phase_of(self, element: ElementCategory) -> SeasonalPhase {
        let peak = self.prosperous_element();
        if element == peak {
            SeasonalPhase::Prosperous
        } else if element == peak.generates() {
            SeasonalPhase::Prime
        } else if element == peak.generated_by() {
            SeasonalPhase::Rest
        } else if element == peak.overcome_by() {
            SeasonalPhase::Imprisoned
        } else {
            SeasonalPhase::Dead
        }
    }

    /// Multiplier for each element, indexed by enumeration order
    pub fn multipliers(self) -> [f64; 5] {
        let mut out = [1.0; 5];
        for &element in ElementCategory::all() {
            out[element.index()] = self.phase_of(element).multiplier();
        }
        out
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
            Season::EarthProsperous => "Earth Prosperous",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The four vault branches: 辰 戌 丑 未
pub fn is_vault(branch: BranchToken) -> bool {
    matches!(
        branch,
        BranchToken::Chen | BranchToken::Xu | BranchToken::Chou | BranchToken::Wei
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ElementCategory::*;

    #[test]
    fn test_spring_phases() {
        let s = Season::Spring;
        assert_eq!(s.phase_of(Wood), SeasonalPhase::Prosperous);
        assert_eq!(s.phase_of(Fire), SeasonalPhase::Prime);
        assert_eq!(s.phase_of(Water), SeasonalPhase::Rest);
        assert_eq!(s.phase_of(Metal), SeasonalPhase::Imprisoned);
        assert_eq!(s.phase_of(Earth), SeasonalPhase::Dead);
    }

    #[test]
    fn test_autumn_and_winter_phases() {
        assert_eq!(Season::Autumn.phase_of(Water), SeasonalPhase::Prime);
        assert_eq!(Season::Autumn.phase_of(Fire), SeasonalPhase::Imprisoned);
        assert_eq!(Season::Autumn.phase_of(Wood), SeasonalPhase::Dead);
        assert_eq!(Season::Winter.phase_of(Metal), SeasonalPhase::Rest);
        assert_eq!(Season::Winter.phase_of(Fire), SeasonalPhase::Dead);
    }

    #[test]
    fn test_earth_prosperous_only_for_vault_months() {
        assert_eq!(Season::for_month(BranchToken::Chen, true), Season::EarthProsperous);
        assert_eq!(Season::for_month(BranchToken::Chen, false), Season::Spring);
        assert_eq!(Season::for_month(BranchToken::Yin, true), Season::Spring);

        let ep = Season::EarthProsperous;
        assert_eq!(ep.phase_of(Earth), SeasonalPhase::Prosperous);
        assert_eq!(ep.phase_of(Metal), SeasonalPhase::Prime);
        assert_eq!(ep.phase_of(Fire), SeasonalPhase::Rest);
        assert_eq!(ep.phase_of(Wood), SeasonalPhase::Imprisoned);
        assert_eq!(ep.phase_of(Water), SeasonalPhase::Dead);
    }

    #[test]
    fn test_multipliers() {
        let m = Season::Spring.multipliers();
        assert_eq!(m[Wood.index()], 1.2);
        assert_eq!(Season::Autumn.multipliers()[Wood.index()], 0.8);
    }
}
