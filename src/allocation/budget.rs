//! Skill-point budget

use serde::{Deserialize, Serialize};

use crate::codex::{AttributeScores, ClassId};
use crate::ledger::LedgerError;
use crate::progression::Character;

use super::engine::AllocationError;
use super::ranks::SkillRanks;
use super::rules::RankRules;

/// Points granted by the formula and what is left after the committed ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub total: u32,
    pub remaining: u32,
}

impl Budget {
    /// Budget left after paying for `committed` out of `total`.
    ///
    /// Committed ranks above their caps are refused along with sets that
    /// cost more than `total`.
    pub fn from_committed(
        total: u32,
        rules: &RankRules,
        committed: &SkillRanks,
    ) -> Result<Self, AllocationError> {
        if let Some((skill, rank)) = rules.first_over_cap(committed) {
            return Err(AllocationError::CommittedOverCap {
                skill,
                rank,
                max: rules.max_rank(skill),
            });
        }
        let cost = rules.set_cost(committed).ok_or(AllocationError::CostOverflow)?;
        let remaining = total
            .checked_sub(cost)
            .ok_or(AllocationError::CommittedOverBudget { cost, total })?;
        Ok(Self { total, remaining })
    }

    pub fn spent(&self) -> u32 {
        self.total - self.remaining
    }
}

/// Compute the budget for a character.
///
/// `formula` is the ledger's point formula, called with the intelligence
/// score, class and level. Missing level or attribute data is an error;
/// nothing is assumed to be zero.
pub fn compute_budget<F>(
    character: &Character,
    attributes: Option<&AttributeScores>,
    rules: &RankRules,
    committed: &SkillRanks,
    formula: F,
) -> Result<Budget, AllocationError>
where
    F: FnOnce(u32, ClassId, u32) -> Result<u32, LedgerError>,
{
    if !character.has_level() {
        return Err(AllocationError::DataUnavailable("level"));
    }
    let attributes = attributes
        .filter(|a| a.is_assigned())
        .ok_or(AllocationError::DataUnavailable("attributes"))?;

    let total = formula(attributes.intelligence, character.class, character.level)?;
    Budget::from_committed(total, rules, committed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codex::Codex;
    use crate::progression::skill_points;

    fn fighter_rules() -> RankRules {
        RankRules::for_class(&Codex::default(), 5, 1).unwrap()
    }

    fn formula(int: u32, _class: ClassId, level: u32) -> Result<u32, LedgerError> {
        skill_points(2, int, level).ok_or(LedgerError::Unavailable("overflow".to_string()))
    }

    #[test]
    fn test_remaining_after_committed() {
        let rules = fighter_rules();
        let mut committed = SkillRanks::zero();
        committed.set(4, 2); // Climb, class skill
        committed.set(16, 1); // Hide, cross-class
        let budget = Budget::from_committed(12, &rules, &committed).unwrap();
        assert_eq!(budget.remaining, 8);
        assert_eq!(budget.spent(), 4);
    }

    #[test]
    fn test_committed_over_budget() {
        let rules = fighter_rules();
        let mut committed = SkillRanks::zero();
        committed.set(16, 2);
        let err = Budget::from_committed(3, &rules, &committed).unwrap_err();
        assert!(matches!(err, AllocationError::CommittedOverBudget { cost: 4, total: 3 }));
    }

    #[test]
    fn test_committed_over_cap() {
        let rules = fighter_rules();
        let mut committed = SkillRanks::zero();
        committed.set(4, 5); // Climb caps at 4 on level 1
        let err = Budget::from_committed(100, &rules, &committed).unwrap_err();
        assert!(matches!(
            err,
            AllocationError::CommittedOverCap { skill: 4, rank: 5, max: 4 }
        ));
    }

    #[test]
    fn test_huge_committed_rank_is_refused() {
        let rules = fighter_rules();
        let mut committed = SkillRanks::zero();
        committed.set(16, 1 << 31); // Hide, cross-class: cost would overflow
        let err = Budget::from_committed(u32::MAX, &rules, &committed).unwrap_err();
        assert!(matches!(err, AllocationError::CommittedOverCap { skill: 16, .. }));
    }

    #[test]
    fn test_cost_overflow_at_saturated_level() {
        // Caps saturate, so only the checked sum stops this set
        let rules = RankRules::for_class(&Codex::default(), 5, u32::MAX).unwrap();
        let mut committed = SkillRanks::zero();
        committed.set(4, u32::MAX);
        committed.set(33, 1);
        let err = Budget::from_committed(u32::MAX, &rules, &committed).unwrap_err();
        assert!(matches!(err, AllocationError::CostOverflow));
    }

    #[test]
    fn test_compute_budget() {
        let character = Character::new(7, 5, 1);
        let attributes = AttributeScores::new(16, 12, 14, 12, 10, 8);
        let budget = compute_budget(
            &character,
            Some(&attributes),
            &fighter_rules(),
            &SkillRanks::zero(),
            formula,
        )
        .unwrap();
        assert_eq!(budget, Budget { total: 12, remaining: 12 });
    }

    #[test]
    fn test_missing_data_is_not_zero() {
        let rules = fighter_rules();
        let zero = SkillRanks::zero();

        let average = AttributeScores::new(10, 10, 10, 10, 10, 10);
        let err = compute_budget(&Character::new(7, 5, 0), Some(&average), &rules, &zero, formula)
            .unwrap_err();
        assert!(matches!(err, AllocationError::DataUnavailable("level")));

        let err =
            compute_budget(&Character::new(7, 5, 1), None, &rules, &zero, formula).unwrap_err();
        assert!(matches!(err, AllocationError::DataUnavailable("attributes")));

        let unassigned = AttributeScores::default();
        let err =
            compute_budget(&Character::new(7, 5, 1), Some(&unassigned), &rules, &zero, formula)
                .unwrap_err();
        assert!(matches!(err, AllocationError::DataUnavailable("attributes")));
    }

    #[test]
    fn test_formula_error_propagates() {
        let attributes = AttributeScores::new(10, 10, 10, 10, 10, 10);
        let err = compute_budget(
            &Character::new(7, 5, 1),
            Some(&attributes),
            &fighter_rules(),
            &SkillRanks::zero(),
            |_, _, _| Err(LedgerError::Unavailable("rpc timeout".to_string())),
        )
        .unwrap_err();
        assert!(matches!(err, AllocationError::Ledger(LedgerError::Unavailable(_))));
    }
}
