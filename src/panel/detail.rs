//! Skill detail view

use crate::allocation::SkillAllocation;
use crate::codex::{Attribute, Codex, SkillId};

/// Everything shown when a skill is inspected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDetail {
    pub id: SkillId,
    pub name: String,
    pub attribute: Attribute,
    pub armor_check_penalty: bool,
    /// Name of the skill granting a synergy bonus
    pub synergy: Option<String>,
    pub class_skill: bool,
    pub rank: u32,
    pub max_rank: u32,
    pub cost: u32,
}

impl SkillDetail {
    pub fn build(codex: &Codex, allocation: &SkillAllocation, id: SkillId) -> Option<Self> {
        let skill = codex.skill(id)?;
        let rules = allocation.rules();
        Some(Self {
            id,
            name: skill.name.clone(),
            attribute: skill.attribute,
            armor_check_penalty: skill.armor_check_penalty,
            synergy: skill
                .synergy
                .and_then(|s| codex.skill(s))
                .map(|s| s.name.clone()),
            class_skill: rules.is_class_skill(id),
            rank: allocation.rank(id),
            max_rank: rules.max_rank(id),
            cost: rules.rank_cost(id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::{Budget, RankRules, SkillRanks};

    #[test]
    fn test_detail_for_cross_class_skill() {
        let codex = Codex::default();
        let rules = RankRules::for_class(&codex, 5, 1).unwrap();
        let committed = SkillRanks::zero();
        let budget = Budget::from_committed(8, &rules, &committed).unwrap();
        let allocation = SkillAllocation::new(rules, committed, budget);

        let detail = SkillDetail::build(&codex, &allocation, 34).unwrap();
        assert_eq!(detail.name, "Tumble");
        assert_eq!(detail.attribute, Attribute::Dexterity);
        assert!(detail.armor_check_penalty);
        assert_eq!(detail.synergy.as_deref(), Some("Jump"));
        assert!(!detail.class_skill);
        assert_eq!(detail.max_rank, 2);
        assert_eq!(detail.cost, 2);

        assert!(SkillDetail::build(&codex, &allocation, 0).is_none());
    }
}
