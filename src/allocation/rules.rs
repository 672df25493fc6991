//! Per-skill caps and costs for one summoner

use crate::codex::{ClassId, Codex, SkillId, SKILL_COUNT};

use super::ranks::SkillRanks;

/// Rank caps and point costs derived from class and level.
///
/// Class skills cost 1 point per rank and cap at `level + 3`; every other
/// skill costs 2 points and caps at half of that, rounded down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankRules {
    level: u32,
    class_skills: [bool; SKILL_COUNT],
}

impl RankRules {
    pub fn new(level: u32, class_skills: [bool; SKILL_COUNT]) -> Self {
        Self { level, class_skills }
    }

    /// Rules for a class from the codex, `None` for an unknown class
    pub fn for_class(codex: &Codex, class: ClassId, level: u32) -> Option<Self> {
        codex
            .class(class)
            .map(|def| Self::new(level, def.class_skill_flags()))
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// `level + 3`, clamped at `u32::MAX`
    pub fn class_level(&self) -> u32 {
        self.level.saturating_add(3)
    }

    pub fn is_class_skill(&self, id: SkillId) -> bool {
        (id as usize)
            .checked_sub(1)
            .and_then(|i| self.class_skills.get(i))
            .copied()
            .unwrap_or(false)
    }

    pub fn max_rank(&self, id: SkillId) -> u32 {
        if self.is_class_skill(id) {
            self.class_level()
        } else {
            self.class_level() / 2
        }
    }

    /// Points spent per rank
    pub fn rank_cost(&self, id: SkillId) -> u32 {
        if self.is_class_skill(id) { 1 } else { 2 }
    }

    /// Points spent by a whole rank set, `None` if it does not fit in a `u32`
    pub fn set_cost(&self, ranks: &SkillRanks) -> Option<u32> {
        ranks.iter().try_fold(0u32, |total, (id, rank)| {
            rank.checked_mul(self.rank_cost(id))
                .and_then(|cost| total.checked_add(cost))
        })
    }

    /// Every rank within its cap
    pub fn within_caps(&self, ranks: &SkillRanks) -> bool {
        self.first_over_cap(ranks).is_none()
    }

    /// First skill whose rank exceeds its cap, with that rank
    pub fn first_over_cap(&self, ranks: &SkillRanks) -> Option<(SkillId, u32)> {
        ranks.iter().find(|&(id, rank)| rank > self.max_rank(id))
    }
}
