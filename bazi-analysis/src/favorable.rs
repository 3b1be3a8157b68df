//! Favorability roles and the traditional deriver
//!
//! A favorable element set binds the five roles to the five elements, one
//! element per role. The traditional rule uses only the self element and
//! the dominant/deficient flag.

use crate::day_master::DayMasterStrength;
use bazi_common::ElementCategory;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Favorability role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FavorableRole {
    PrimaryFavorable,
    SecondaryFavorable,
    PrimaryUnfavorable,
    SecondaryUnfavorable,
    Neutral,
}

impl FavorableRole {
    pub fn all() -> &'static [FavorableRole; 5] {
        &[
            FavorableRole::PrimaryFavorable,
            FavorableRole::SecondaryFavorable,
            FavorableRole::PrimaryUnfavorable,
            FavorableRole::SecondaryUnfavorable,
            FavorableRole::Neutral,
        ]
    }

    pub fn is_favorable(self) -> bool {
        matches!(self, FavorableRole::PrimaryFavorable | FavorableRole::SecondaryFavorable)
    }

    pub fn is_unfavorable(self) -> bool {
        matches!(
            self,
            FavorableRole::PrimaryUnfavorable | FavorableRole::SecondaryUnfavorable
        )
    }

    /// +1 favorable, -1 unfavorable, 0 neutral
    pub fn sign(self) -> f64 {
        if self.is_favorable() {
            1.0
        } else if self.is_unfavorable() {
            -1.0
        } else {
            0.0
        }
    }

    pub fn chinese(self) -> &'static str {
        match self {
            FavorableRole::PrimaryFavorable => "用神",
            FavorableRole::SecondaryFavorable => "喜神",
            FavorableRole::PrimaryUnfavorable => "忌神",
            FavorableRole::SecondaryUnfavorable => "仇神",
            FavorableRole::Neutral => "闲神",
        }
    }
}

/// Five roles bound bijectively to the five elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavorableElementSet {
    pub primary_favorable: ElementCategory,
    pub secondary_favorable: ElementCategory,
    pub primary_unfavorable: ElementCategory,
    pub secondary_unfavorable: ElementCategory,
    pub neutral: ElementCategory,
}

impl FavorableElementSet {
    /// Bind four distinct roles; neutral is whatever element remains
    pub(crate) fn from_roles(
        primary_favorable: ElementCategory,
        secondary_favorable: ElementCategory,
        primary_unfavorable: ElementCategory,
        secondary_unfavorable: ElementCategory,
    ) -> Self {
        let assigned = [
            primary_favorable,
            secondary_favorable,
            primary_unfavorable,
            secondary_unfavorable,
        ];
        let neutral = ElementCategory::all()
            .iter()
            .copied()
            .find(|e| !assigned.contains(e))
            .unwrap_or(primary_favorable);
        let set = Self {
            primary_favorable,
            secondary_favorable,
            primary_unfavorable,
            secondary_unfavorable,
            neutral,
        };
        debug_assert!(set.is_bijective(), "roles bound twice: {:?}", set);
        set
    }

    pub fn element(&self, role: FavorableRole) -> ElementCategory {
        match role {
            FavorableRole::PrimaryFavorable => self.primary_favorable,
            FavorableRole::SecondaryFavorable => self.secondary_favorable,
            FavorableRole::PrimaryUnfavorable => self.primary_unfavorable,
            FavorableRole::SecondaryUnfavorable => self.secondary_unfavorable,
            FavorableRole::Neutral => self.neutral,
        }
    }

    /// (role, element) in role order
    pub fn iter(&self) -> impl Iterator<Item = (FavorableRole, ElementCategory)> + '_ {
        FavorableRole::all().iter().map(move |&r| (r, self.element(r)))
    }

    pub fn role_of(&self, element: ElementCategory) -> Option<FavorableRole> {
        self.iter().find(|(_, e)| *e == element).map(|(r, _)| r)
    }

    pub fn elements_with(&self, role: FavorableRole) -> Vec<ElementCategory> {
        self.iter().filter(|(r, _)| *r == role).map(|(_, e)| e).collect()
    }

    pub fn favorable(&self) -> [ElementCategory; 2] {
        [self.primary_favorable, self.secondary_favorable]
    }

    pub fn unfavorable(&self) -> [ElementCategory; 2] {
        [self.primary_unfavorable, self.secondary_unfavorable]
    }

    /// Every element appears in exactly one role
    pub fn is_bijective(&self) -> bool {
        ElementCategory::all()
            .iter()
            .all(|&e| self.iter().filter(|(_, x)| *x == e).count() == 1)
    }
}

/// Structural favorability from the self element and dominance alone
pub fn derive_favorable_traditional(
    self_element: ElementCategory,
    strength: &DayMasterStrength,
) -> FavorableElementSet {
    let set = if strength.is_dominant() {
        // Drain and control a strong self
        FavorableElementSet::from_roles(
            self_element.generates(),
            self_element.overcome_by(),
            self_element.generated_by(),
            self_element,
        )
    } else {
        // Feed and reinforce a weak self
        FavorableElementSet::from_roles(
            self_element.generated_by(),
            self_element,
            self_element.generates(),
            self_element.overcomes(),
        )
    };

    debug!(
        "Traditional favorability for {} ({}): favorable {:?}, unfavorable {:?}, neutral {}",
        self_element,
        strength.label(),
        set.favorable(),
        set.unfavorable(),
        set.neutral
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use ElementCategory::*;

    #[test]
    fn test_deficient_wood() {
        let set = derive_favorable_traditional(Wood, &DayMasterStrength::new(30.0, 70.0));
        assert_eq!(set.primary_favorable, Water);
        assert_eq!(set.secondary_favorable, Wood);
        assert_eq!(set.primary_unfavorable, Fire);
        assert_eq!(set.secondary_unfavorable, Earth);
        assert_eq!(set.neutral, Metal);
    }

    #[test]
    fn test_dominant_wood() {
        let set = derive_favorable_traditional(Wood, &DayMasterStrength::new(70.0, 30.0));
        assert_eq!(set.primary_favorable, Fire);
        assert_eq!(set.secondary_favorable, Metal);
        assert_eq!(set.primary_unfavorable, Water);
        assert_eq!(set.secondary_unfavorable, Wood);
        assert_eq!(set.neutral, Earth);
    }

    #[test]
    fn test_always_bijective() {
        for &element in ElementCategory::all() {
            for strength in [DayMasterStrength::new(1.0, 0.0), DayMasterStrength::new(0.0, 1.0)] {
                let set = derive_favorable_traditional(element, &strength);
                assert!(set.is_bijective(), "{:?} {:?}", element, set);
            }
        }
    }

    #[test]
    fn test_from_roles_fills_neutral() {
        let set = FavorableElementSet::from_roles(Water, Metal, Earth, Fire);
        assert_eq!(set.neutral, Wood);
        assert!(set.is_bijective());
    }

    #[test]
    fn test_role_queries() {
        let set = derive_favorable_traditional(Fire, &DayMasterStrength::new(0.0, 0.0));
        assert_eq!(set.role_of(Earth), Some(FavorableRole::PrimaryFavorable));
        assert_eq!(set.elements_with(FavorableRole::Neutral), vec![set.neutral]);
        assert_eq!(FavorableRole::Neutral.sign(), 0.0);
        assert_eq!(FavorableRole::SecondaryUnfavorable.sign(), -1.0);
    }
}
