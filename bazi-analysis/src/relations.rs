//! Branch relationship analyzer
//!
//! Scans the four branches of a chart and emits one record per matched
//! relation. Pairwise kinds are tested over every pair of positions i < j.
//! Group kinds (triads, three-branch punishments) match on set membership,
//! so duplicates neither help nor hurt.
//!
//! Detection order:
//! 1. Six-harmony
//! 2. Three-harmony, then half-harmony (suppressed when the full triad of
//!    the same element matched)
//! 3. Directional triads
//! 4. Clashes
//! 5. Punishments (groups, pairs not subsumed by a matched group, self)
//! 6. Harms, breaks
//! 7. Four-vault occurrences

use bazi_common::tables::{self, PunishmentKind};
use bazi_common::{BranchToken, Chart, ElementCategory, PillarPosition};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Kind of branch relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    SixHarmony,
    ThreeHarmony,
    HalfHarmony,
    DirectionalTriad,
    Clash,
    Punishment(PunishmentKind),
    Harm,
    Break,
    FourVault,
}

impl RelationKind {
    pub fn chinese(self) -> &'static str {
        match self {
            RelationKind::SixHarmony => "六合",
            RelationKind::ThreeHarmony => "三合",
            RelationKind::HalfHarmony => "半合",
            RelationKind::DirectionalTriad => "三会",
            RelationKind::Clash => "冲",
            RelationKind::Punishment(kind) => kind.chinese(),
            RelationKind::Harm => "害",
            RelationKind::Break => "破",
            RelationKind::FourVault => "四库",
        }
    }

    pub fn is_harmony(self) -> bool {
        matches!(
            self,
            RelationKind::SixHarmony
                | RelationKind::ThreeHarmony
                | RelationKind::HalfHarmony
                | RelationKind::DirectionalTriad
        )
    }

    pub fn is_conflict(self) -> bool {
        matches!(
            self,
            RelationKind::Clash | RelationKind::Punishment(_) | RelationKind::Harm | RelationKind::Break
        )
    }
}

/// One detected relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub kind: RelationKind,
    /// Participating tokens
    pub branches: Vec<BranchToken>,
    /// Positions the participating tokens occupy
    pub positions: Vec<PillarPosition>,
    /// Element formed (combinations) or stored (vaults)
    pub element: Option<ElementCategory>,
}

impl RelationRecord {
    fn pair(
        kind: RelationKind,
        (a, pa): (BranchToken, PillarPosition),
        (b, pb): (BranchToken, PillarPosition),
        element: Option<ElementCategory>,
    ) -> Self {
        Self {
            kind,
            branches: vec![a, b],
            positions: vec![pa, pb],
            element,
        }
    }

    /// Pillar distance for two-position records
    pub fn distance(&self) -> Option<usize> {
        match self.positions.as_slice() {
            [a, b] => Some(a.distance(*b)),
            _ => None,
        }
    }
}

impl std::fmt::Display for RelationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tokens: String = self.branches.iter().map(|b| b.chinese()).collect();
        write!(f, "{}{}", tokens, self.kind.chinese())?;
        if let Some(element) = self.element {
            write!(f, "({})", element.chinese())?;
        }
        Ok(())
    }
}

/// All relations found in one chart, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationsReport {
    pub six_harmony: Vec<RelationRecord>,
    pub three_harmony: Vec<RelationRecord>,
    pub half_harmony: Vec<RelationRecord>,
    pub directional: Vec<RelationRecord>,
    pub clash: Vec<RelationRecord>,
    pub punishment: Vec<RelationRecord>,
    pub harm: Vec<RelationRecord>,
    pub breaks: Vec<RelationRecord>,
    pub four_vault: Vec<RelationRecord>,
}

impl RelationsReport {
    /// Every record in detection order
    pub fn all(&self) -> impl Iterator<Item = &RelationRecord> {
        self.six_harmony
            .iter()
            .chain(&self.three_harmony)
            .chain(&self.half_harmony)
            .chain(&self.directional)
            .chain(&self.clash)
            .chain(&self.punishment)
            .chain(&self.harm)
            .chain(&self.breaks)
            .chain(&self.four_vault)
    }

    pub fn len(&self) -> usize {
        self.all().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn harmony_count(&self) -> usize {
        self.all().filter(|r| r.kind.is_harmony()).count()
    }

    pub fn conflict_count(&self) -> usize {
        self.all().filter(|r| r.kind.is_conflict()).count()
    }

    /// A full 寅巳申 or 丑戌未 group is present
    pub fn has_complete_punishment_group(&self) -> bool {
        self.punishment.iter().any(|r| {
            matches!(
                r.kind,
                RelationKind::Punishment(PunishmentKind::Ungrateful | PunishmentKind::Bullying)
            ) && r.branches.len() == 3
        })
    }

    pub fn has_self_punishment(&self) -> bool {
        self.punishment
            .iter()
            .any(|r| r.kind == RelationKind::Punishment(PunishmentKind::SelfPunishment))
    }

    /// A full three-harmony or directional triad is present
    pub fn has_complete_combination(&self) -> bool {
        !self.three_harmony.is_empty() || !self.directional.is_empty()
    }
}

/// Stateless branch relationship analyzer
#[derive(Debug, Default, Clone, Copy)]
pub struct BranchAnalyzer;

impl BranchAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, chart: &Chart) -> RelationsReport {
        let slots: Vec<(BranchToken, PillarPosition)> = PillarPosition::all()
            .iter()
            .map(|&p| (chart.pillar(p).branch, p))
            .collect();
        let present: HashSet<BranchToken> = slots.iter().map(|(b, _)| *b).collect();

        let six_harmony = pairs_matching(&slots, |a, b| {
            tables::is_six_harmony(a, b).then_some((RelationKind::SixHarmony, None))
        });

        let three_harmony = triads(
            &slots,
            &present,
            &tables::THREE_HARMONY_TRIADS,
            RelationKind::ThreeHarmony,
        );

        let formed: HashSet<ElementCategory> =
            three_harmony.iter().filter_map(|r| r.element).collect();
        let half_harmony = pairs_matching(&slots, |a, b| {
            tables::half_harmony_element(a, b)
                .filter(|e| !formed.contains(e))
                .map(|e| (RelationKind::HalfHarmony, Some(e)))
        });

        let directional = triads(
            &slots,
            &present,
            &tables::DIRECTIONAL_TRIADS,
            RelationKind::DirectionalTriad,
        );

        let report = RelationsReport {
            six_harmony,
            three_harmony,
            half_harmony,
            directional,
            clash: pairs_matching(&slots, |a, b| {
                tables::is_clash(a, b).then_some((RelationKind::Clash, None))
            }),
            punishment: punishments(&slots, &present),
            harm: pairs_matching(&slots, |a, b| {
                tables::is_harm(a, b).then_some((RelationKind::Harm, None))
            }),
            breaks: pairs_matching(&slots, |a, b| {
                tables::is_break(a, b).then_some((RelationKind::Break, None))
            }),
            four_vault: slots
                .iter()
                .filter_map(|&(b, p)| {
                    tables::vault_element(b).map(|e| RelationRecord {
                        kind: RelationKind::FourVault,
                        branches: vec![b],
                        positions: vec![p],
                        element: Some(e),
                    })
                })
                .collect(),
        };

        debug!(
            "Branch relations for {}: {} harmony, {} conflict, {} vault",
            chart,
            report.harmony_count(),
            report.conflict_count(),
            report.four_vault.len()
        );

        report
    }
}

/// Analyze the branch relations of a chart
pub fn analyze_relations(chart: &Chart) -> RelationsReport {
    BranchAnalyzer::new().analyze(chart)
}

fn pairs_matching<F>(slots: &[(BranchToken, PillarPosition)], matcher: F) -> Vec<RelationRecord>
where
    F: Fn(BranchToken, BranchToken) -> Option<(RelationKind, Option<ElementCategory>)>,
{
    let mut out = Vec::new();
    for (i, &first) in slots.iter().enumerate() {
        for &second in &slots[i + 1..] {
            if let Some((kind, element)) = matcher(first.0, second.0) {
                out.push(RelationRecord::pair(kind, first, second, element));
            }
        }
    }
    out
}

fn group_record(
    kind: RelationKind,
    group: &[BranchToken; 3],
    slots: &[(BranchToken, PillarPosition)],
    element: Option<ElementCategory>,
) -> RelationRecord {
    RelationRecord {
        kind,
        branches: group.to_vec(),
        positions: slots
            .iter()
            .filter(|(b, _)| group.contains(b))
            .map(|(_, p)| *p)
            .collect(),
        element,
    }
}

fn triads(
    slots: &[(BranchToken, PillarPosition)],
    present: &HashSet<BranchToken>,
    table: &[([BranchToken; 3], ElementCategory)],
    kind: RelationKind,
) -> Vec<RelationRecord> {
    table
        .iter()
        .filter(|(group, _)| group.iter().all(|b| present.contains(b)))
        .map(|(group, element)| group_record(kind, group, slots, Some(*element)))
        .collect()
}

fn punishments(
    slots: &[(BranchToken, PillarPosition)],
    present: &HashSet<BranchToken>,
) -> Vec<RelationRecord> {
    let mut out: Vec<RelationRecord> = tables::PUNISHMENT_GROUPS
        .iter()
        .filter(|(group, _)| group.iter().all(|b| present.contains(b)))
        .map(|(group, kind)| group_record(RelationKind::Punishment(*kind), group, slots, None))
        .collect();

    let complete: HashSet<PunishmentKind> = out
        .iter()
        .filter_map(|r| match r.kind {
            RelationKind::Punishment(kind) => Some(kind),
            _ => None,
        })
        .collect();

    out.extend(pairs_matching(slots, |a, b| {
        tables::pair_punishment(a, b)
            .filter(|kind| !complete.contains(kind))
            .map(|kind| (RelationKind::Punishment(kind), None))
    }));

    for &token in tables::SELF_PUNISHMENT_BRANCHES.iter() {
        let positions: Vec<PillarPosition> = slots
            .iter()
            .filter(|(b, _)| *b == token)
            .map(|(_, p)| *p)
            .collect();
        if positions.len() >= 2 {
            out.push(RelationRecord {
                kind: RelationKind::Punishment(PunishmentKind::SelfPunishment),
                branches: vec![token, token],
                positions,
                element: None,
            });
        }
    }

    out
}
