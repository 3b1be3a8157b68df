//! Static branch relation tables
//!
//! Immutable, process-wide data for the eight branch relation kinds.
//! Pair tables are stored once per unordered pair; lookups go through the
//! accessor functions, which normalize the order of their arguments.

use crate::elements::ElementCategory;
use crate::tokens::BranchToken;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use BranchToken::*;

pub type BranchPair = (BranchToken, BranchToken);

/// Six-harmony pairs
pub const SIX_HARMONY_PAIRS: [BranchPair; 6] = [
    (Zi, Chou),
    (Yin, Hai),
    (Mao, Xu),
    (Chen, You),
    (Si, Shen),
    (Wu, Wei),
];

/// Three-harmony triads and the element each forms
pub const THREE_HARMONY_TRIADS: [([BranchToken; 3], ElementCategory); 4] = [
    ([Yin, Wu, Xu], ElementCategory::Fire),
    ([Si, You, Chou], ElementCategory::Metal),
    ([Shen, Zi, Chen], ElementCategory::Water),
    ([Hai, Mao, Wei], ElementCategory::Wood),
];

/// Directional (seasonal) triads and their element
pub const DIRECTIONAL_TRIADS: [([BranchToken; 3], ElementCategory); 4] = [
    ([Yin, Mao, Chen], ElementCategory::Wood),
    ([Si, Wu, Wei], ElementCategory::Fire),
    ([Shen, You, Xu], ElementCategory::Metal),
    ([Hai, Zi, Chou], ElementCategory::Water),
];

pub const CLASH_PAIRS: [BranchPair; 6] = [
    (Zi, Wu),
    (Chou, Wei),
    (Yin, Shen),
    (Mao, You),
    (Chen, Xu),
    (Si, Hai),
];

pub const HARM_PAIRS: [BranchPair; 6] = [
    (Zi, Wei),
    (Chou, Wu),
    (Yin, Si),
    (Mao, Chen),
    (Shen, Hai),
    (You, Xu),
];

pub const BREAK_PAIRS: [BranchPair; 6] = [
    (Zi, You),
    (Mao, Wu),
    (Yin, Hai),
    (Si, Shen),
    (Chen, Chou),
    (Xu, Wei),
];

/// Sub-kind of a punishment relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PunishmentKind {
    /// 寅巳申 group or one of its pairs
    Ungrateful,
    /// 丑戌未 group or one of its pairs
    Bullying,
    /// 子卯
    Disrespectful,
    /// Same token seen twice
    SelfPunishment,
}

impl PunishmentKind {
    pub fn chinese(self) -> &'static str {
        match self {
            PunishmentKind::Ungrateful => "无恩之刑",
            PunishmentKind::Bullying => "持势之刑",
            PunishmentKind::Disrespectful => "无礼之刑",
            PunishmentKind::SelfPunishment => "自刑",
        }
    }
}

/// Three-branch punishment groups
pub const PUNISHMENT_GROUPS: [([BranchToken; 3], PunishmentKind); 2] = [
    ([Yin, Si, Shen], PunishmentKind::Ungrateful),
    ([Chou, Xu, Wei], PunishmentKind::Bullying),
];

pub const DISRESPECT_PAIR: BranchPair = (Zi, Mao);

/// Tokens that punish themselves when repeated
pub const SELF_PUNISHMENT_BRANCHES: [BranchToken; 4] = [Chen, Wu, You, Hai];

/// Vault branches and the element each stores
pub const VAULTS: [(BranchToken, ElementCategory); 4] = [
    (Chen, ElementCategory::Water),
    (Xu, ElementCategory::Fire),
    (Chou, ElementCategory::Metal),
    (Wei, ElementCategory::Wood),
];

fn pair_set(pairs: &[BranchPair]) -> HashSet<BranchPair> {
    pairs.iter().map(|&(a, b)| normalize(a, b)).collect()
}

fn normalize(a: BranchToken, b: BranchToken) -> BranchPair {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

static SIX_HARMONY: Lazy<HashSet<BranchPair>> = Lazy::new(|| pair_set(&SIX_HARMONY_PAIRS));
static CLASH: Lazy<HashSet<BranchPair>> = Lazy::new(|| pair_set(&CLASH_PAIRS));
static HARM: Lazy<HashSet<BranchPair>> = Lazy::new(|| pair_set(&HARM_PAIRS));
static BREAK: Lazy<HashSet<BranchPair>> = Lazy::new(|| pair_set(&BREAK_PAIRS));

pub fn is_six_harmony(a: BranchToken, b: BranchToken) -> bool {
    SIX_HARMONY.contains(&normalize(a, b))
}

pub fn is_clash(a: BranchToken, b: BranchToken) -> bool {
    CLASH.contains(&normalize(a, b))
}

pub fn is_harm(a: BranchToken, b: BranchToken) -> bool {
    HARM.contains(&normalize(a, b))
}

pub fn is_break(a: BranchToken, b: BranchToken) -> bool {
    BREAK.contains(&normalize(a, b))
}

/// Element of the three-harmony triad containing both branches, if any
pub fn half_harmony_element(a: BranchToken, b: BranchToken) -> Option<ElementCategory> {
    if a == b {
        return None;
    }
    THREE_HARMONY_TRIADS
        .iter()
        .find(|(triad, _)| triad.contains(&a) && triad.contains(&b))
        .map(|(_, element)| *element)
}

/// Punishment sub-kind for a pair of distinct branches, ignoring group completeness
pub fn pair_punishment(a: BranchToken, b: BranchToken) -> Option<PunishmentKind> {
    if a == b {
        return None;
    }
    if normalize(a, b) == normalize(DISRESPECT_PAIR.0, DISRESPECT_PAIR.1) {
        return Some(PunishmentKind::Disrespectful);
    }
    PUNISHMENT_GROUPS
        .iter()
        .find(|(group, _)| group.contains(&a) && group.contains(&b))
        .map(|(_, kind)| *kind)
}

pub fn is_self_punishing(branch: BranchToken) -> bool {
    SELF_PUNISHMENT_BRANCHES.contains(&branch)
}

/// Stored element of a vault branch
pub fn vault_element(branch: BranchToken) -> Option<ElementCategory> {
    VAULTS
        .iter()
        .find(|(b, _)| *b == branch)
        .map(|(_, element)| *element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_lookups_are_symmetric() {
        for &(a, b) in CLASH_PAIRS.iter() {
            assert!(is_clash(a, b));
            assert!(is_clash(b, a));
        }
        assert!(is_six_harmony(Hai, Yin));
        assert!(is_harm(Wei, Zi));
        assert!(is_break(Chou, Chen));
        assert!(!is_clash(Zi, Chou));
    }

    #[test]
    fn test_clashes_are_six_apart() {
        for &(a, b) in CLASH_PAIRS.iter() {
            assert_eq!(a.index().abs_diff(b.index()), 6);
        }
    }

    #[test]
    fn test_yin_hai_is_harmony_and_break() {
        assert!(is_six_harmony(Yin, Hai));
        assert!(is_break(Yin, Hai));
    }

    #[test]
    fn test_half_harmony_element() {
        assert_eq!(half_harmony_element(Shen, Zi), Some(ElementCategory::Water));
        assert_eq!(half_harmony_element(Xu, Yin), Some(ElementCategory::Fire));
        assert_eq!(half_harmony_element(Zi, Chou), None);
        assert_eq!(half_harmony_element(Zi, Zi), None);
    }

    #[test]
    fn test_pair_punishment() {
        assert_eq!(pair_punishment(Mao, Zi), Some(PunishmentKind::Disrespectful));
        assert_eq!(pair_punishment(Yin, Si), Some(PunishmentKind::Ungrateful));
        assert_eq!(pair_punishment(Wei, Xu), Some(PunishmentKind::Bullying));
        assert_eq!(pair_punishment(Zi, Wu), None);
    }

    #[test]
    fn test_vaults() {
        assert_eq!(vault_element(Chen), Some(ElementCategory::Water));
        assert_eq!(vault_element(Wei), Some(ElementCategory::Wood));
        assert_eq!(vault_element(Zi), None);
        for (branch, _) in VAULTS {
            assert!(crate::season::is_vault(branch));
        }
    }
}
