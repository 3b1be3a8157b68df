//! Element categories and polarity
//!
//! The five element categories form two fixed 5-cycles:
//! - Generation: Wood → Fire → Earth → Metal → Water → Wood
//! - Overcoming: Wood → Earth → Water → Fire → Metal → Wood
//!
//! Every other relation in the crate (beneficial/harmful sets, bridge
//! elements, favorability roles) is derived from these two successor
//! functions and their inverses.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the five element categories
///
/// Variant order is the fixed enumeration order used for every tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementCategory {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl ElementCategory {
    /// All elements in enumeration order
    pub fn all() -> &'static [ElementCategory; 5] {
        &[
            ElementCategory::Wood,
            ElementCategory::Fire,
            ElementCategory::Earth,
            ElementCategory::Metal,
            ElementCategory::Water,
        ]
    }

    /// Position in enumeration order (0..5)
    pub fn index(self) -> usize {
        match self {
            ElementCategory::Wood => 0,
            ElementCategory::Fire => 1,
            ElementCategory::Earth => 2,
            ElementCategory::Metal => 3,
            ElementCategory::Water => 4,
        }
    }

    /// Element this one generates
    pub fn generates(self) -> ElementCategory {
        match self {
            ElementCategory::Wood => ElementCategory::Fire,
            ElementCategory::Fire => ElementCategory::Earth,
            ElementCategory::Earth => ElementCategory::Metal,
            ElementCategory::Metal => ElementCategory::Water,
            ElementCategory::Water => ElementCategory::Wood,
        }
    }

    /// Element this one overcomes
    pub fn overcomes(self) -> ElementCategory {
        match self {
            ElementCategory::Wood => ElementCategory::Earth,
            ElementCategory::Fire => ElementCategory::Metal,
            ElementCategory::Earth => ElementCategory::Water,
            ElementCategory::Metal => ElementCategory::Wood,
            ElementCategory::Water => ElementCategory::Fire,
        }
    }

    /// Element that generates this one
    pub fn generated_by(self) -> ElementCategory {
        match self {
            ElementCategory::Wood => ElementCategory::Water,
            ElementCategory::Fire => ElementCategory::Wood,
            ElementCategory::Earth => ElementCategory::Fire,
            ElementCategory::Metal => ElementCategory::Earth,
            ElementCategory::Water => ElementCategory::Metal,
        }
    }

    /// Element that overcomes this one
    pub fn overcome_by(self) -> ElementCategory {
        match self {
            ElementCategory::Wood => ElementCategory::Metal,
            ElementCategory::Fire => ElementCategory::Water,
            ElementCategory::Earth => ElementCategory::Wood,
            ElementCategory::Metal => ElementCategory::Fire,
            ElementCategory::Water => ElementCategory::Earth,
        }
    }

    /// Elements that support this one: itself and its generator
    pub fn beneficial_set(self) -> [ElementCategory; 2] {
        [self, self.generated_by()]
    }

    /// Elements that drain or attack this one
    ///
    /// Together with [`beneficial_set`](Self::beneficial_set) this partitions
    /// all five elements.
    pub fn harmful_set(self) -> [ElementCategory; 3] {
        [self.generates(), self.overcomes(), self.overcome_by()]
    }

    /// Relation of `other` as seen from `self`
    pub fn relation_to(self, other: ElementCategory) -> ElementRelation {
        if self == other {
            ElementRelation::Same
        } else if self.generates() == other {
            ElementRelation::Generates
        } else if self.overcomes() == other {
            ElementRelation::Overcomes
        } else if other.overcomes() == self {
            ElementRelation::OvercomeBy
        } else {
            // Only remaining case on a 5-node graph with both cycles total
            ElementRelation::GeneratedBy
        }
    }

    /// Canonical Chinese character
    pub fn chinese(self) -> &'static str {
        match self {
            ElementCategory::Wood => "木",
            ElementCategory::Fire => "火",
            ElementCategory::Earth => "土",
            ElementCategory::Metal => "金",
            ElementCategory::Water => "水",
        }
    }

    /// Get human-readable display name
    pub fn display_name(self) -> &'static str {
        match self {
            ElementCategory::Wood => "Wood",
            ElementCategory::Fire => "Fire",
            ElementCategory::Earth => "Earth",
            ElementCategory::Metal => "Metal",
            ElementCategory::Water => "Water",
        }
    }
}

impl FromStr for ElementCategory {
    type Err = Error;

    /// Parse from Chinese character or English name (case insensitive)
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        ElementCategory::all()
            .iter()
            .copied()
            .find(|e| e.chinese() == trimmed || e.display_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidToken(format!("unknown element: {:?}", s)))
    }
}

impl std::fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How one element stands relative to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRelation {
    /// Identical element
    Same,
    /// Reference element generates the other
    Generates,
    /// Reference element overcomes the other
    Overcomes,
    /// The other element overcomes the reference
    OvercomeBy,
    /// The other element generates the reference
    GeneratedBy,
}

/// Yin/Yang polarity of a stem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// The other polarity
    pub fn opposite(self) -> Polarity {
        match self {
            Polarity::Yang => Polarity::Yin,
            Polarity::Yin => Polarity::Yang,
        }
    }

    pub fn chinese(self) -> &'static str {
        match self {
            Polarity::Yang => "阳",
            Polarity::Yin => "阴",
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Yang => write!(f, "Yang"),
            Polarity::Yin => write!(f, "Yin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cycles_return_after_five_steps() {
        for &element in ElementCategory::all() {
            let mut g = element;
            let mut o = element;
            for _ in 0..5 {
                g = g.generates();
                o = o.overcomes();
            }
            assert_eq!(g, element, "generation cycle broken at {:?}", element);
            assert_eq!(o, element, "overcoming cycle broken at {:?}", element);
        }
    }

    #[test]
    fn test_cycles_are_bijective_and_distinct() {
        let generated: HashSet<_> = ElementCategory::all().iter().map(|e| e.generates()).collect();
        let overcome: HashSet<_> = ElementCategory::all().iter().map(|e| e.overcomes()).collect();
        assert_eq!(generated.len(), 5);
        assert_eq!(overcome.len(), 5);
        assert!(ElementCategory::all()
            .iter()
            .any(|e| e.generates() != e.overcomes()));
    }

    #[test]
    fn test_inverses() {
        for &element in ElementCategory::all() {
            assert_eq!(element.generates().generated_by(), element);
            assert_eq!(element.overcomes().overcome_by(), element);
        }
    }

    #[test]
    fn test_beneficial_and_harmful_partition() {
        for &element in ElementCategory::all() {
            let beneficial: HashSet<_> = element.beneficial_set().into_iter().collect();
            let harmful: HashSet<_> = element.harmful_set().into_iter().collect();
            assert_eq!(beneficial.len(), 2);
            assert_eq!(harmful.len(), 3);
            assert!(beneficial.is_disjoint(&harmful));
            assert_eq!(beneficial.union(&harmful).count(), 5);
        }
    }

    #[test]
    fn test_relation_to_covers_all_five() {
        let wood = ElementCategory::Wood;
        assert_eq!(wood.relation_to(ElementCategory::Wood), ElementRelation::Same);
        assert_eq!(wood.relation_to(ElementCategory::Fire), ElementRelation::Generates);
        assert_eq!(wood.relation_to(ElementCategory::Earth), ElementRelation::Overcomes);
        assert_eq!(wood.relation_to(ElementCategory::Metal), ElementRelation::OvercomeBy);
        assert_eq!(wood.relation_to(ElementCategory::Water), ElementRelation::GeneratedBy);
    }

    #[test]
    fn test_parse() {
        assert_eq!("木".parse::<ElementCategory>().unwrap(), ElementCategory::Wood);
        assert_eq!("water".parse::<ElementCategory>().unwrap(), ElementCategory::Water);
        assert!(matches!(
            "stone".parse::<ElementCategory>(),
            Err(Error::InvalidToken(_))
        ));
    }

    #[test]
    fn test_polarity_opposite_is_involution() {
        assert_eq!(Polarity::Yang.opposite(), Polarity::Yin);
        assert_eq!(Polarity::Yin.opposite().opposite(), Polarity::Yin);
    }
}
