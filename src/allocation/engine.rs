//! Pending allocation state machine
//!
//! All mutation of the pending rank set goes through `increment`,
//! `decrement` and `reset`. Edits that would break a cap or overspend the
//! budget are dropped without touching any state.

use thiserror::Error;

use crate::codex::{ClassId, SkillId};
use crate::ledger::LedgerError;

use super::budget::Budget;
use super::ranks::SkillRanks;
use super::rules::RankRules;

/// Allocation errors
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("{0} data is not available yet")]
    DataUnavailable(&'static str),
    #[error("unknown class {0}")]
    UnknownClass(ClassId),
    #[error("committed rank {rank} for skill {skill} is above its cap of {max}")]
    CommittedOverCap { skill: SkillId, rank: u32, max: u32 },
    #[error("committed ranks cost more points than can be counted")]
    CostOverflow,
    #[error("committed ranks cost {cost} points but only {total} are available")]
    CommittedOverBudget { cost: u32, total: u32 },
    #[error("allocation is not ready to commit: {remaining} points unspent")]
    NotCommitReady { remaining: u32 },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// One row of the skills table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillLine {
    pub id: SkillId,
    pub committed: u32,
    pub pending: u32,
    pub max_rank: u32,
    pub cost: u32,
    pub class_skill: bool,
}

/// Committed ranks, pending ranks and the budget between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillAllocation {
    rules: RankRules,
    committed: SkillRanks,
    pending: SkillRanks,
    /// Budget as of the last fetch or commit acknowledgment
    budget: Budget,
    /// Points left after the pending edits
    remaining: u32,
}

impl SkillAllocation {
    /// Start a session from freshly fetched data
    pub fn new(rules: RankRules, committed: SkillRanks, budget: Budget) -> Self {
        Self {
            rules,
            committed,
            pending: committed,
            budget,
            remaining: budget.remaining,
        }
    }

    pub fn rules(&self) -> &RankRules {
        &self.rules
    }

    pub fn committed(&self) -> &SkillRanks {
        &self.committed
    }

    pub fn pending(&self) -> &SkillRanks {
        &self.pending
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    /// Points not yet assigned by the pending set
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Pending rank of a skill (0 for unknown ids)
    pub fn rank(&self, id: SkillId) -> u32 {
        self.pending.get(id).unwrap_or(0)
    }

    pub fn can_increment(&self, id: SkillId) -> bool {
        match self.pending.get(id) {
            Some(rank) => {
                rank < self.rules.max_rank(id) && self.rules.rank_cost(id) <= self.remaining
            }
            None => false,
        }
    }

    /// Pending ranks never drop below what is already on the ledger
    pub fn can_decrement(&self, id: SkillId) -> bool {
        match (self.pending.get(id), self.committed.get(id)) {
            (Some(rank), Some(floor)) => rank > floor,
            _ => false,
        }
    }

    /// Raise a skill by one rank. Returns whether the edit applied.
    pub fn increment(&mut self, id: SkillId) -> bool {
        if !self.can_increment(id) {
            log::debug!(
                "Rejected increment of skill {} (rank {}, cap {}, remaining {})",
                id,
                self.rank(id),
                self.rules.max_rank(id),
                self.remaining
            );
            return false;
        }
        let rank = self.rank(id);
        self.pending.set(id, rank + 1);
        self.remaining -= self.rules.rank_cost(id);
        true
    }

    /// Lower a skill by one rank. Returns whether the edit applied.
    pub fn decrement(&mut self, id: SkillId) -> bool {
        if !self.can_decrement(id) {
            log::debug!("Rejected decrement of skill {} (rank {})", id, self.rank(id));
            return false;
        }
        let rank = self.rank(id);
        self.pending.set(id, rank - 1);
        self.remaining += self.rules.rank_cost(id);
        true
    }

    /// Drop all pending edits
    pub fn reset(&mut self) {
        self.pending = self.committed;
        self.remaining = self.budget.remaining;
    }

    /// Whether the pending set differs from the committed one
    pub fn is_dirty(&self) -> bool {
        self.pending != self.committed
    }

    /// Ready only when every point is spent, no more and no less
    pub fn is_commit_ready(&self) -> bool {
        self.remaining == 0
    }

    /// Ranks to submit, in canonical skill order
    pub fn commit(&self) -> Result<SkillRanks, AllocationError> {
        if !self.is_commit_ready() {
            return Err(AllocationError::NotCommitReady {
                remaining: self.remaining,
            });
        }
        Ok(self.pending)
    }

    /// The ledger accepted `submitted`; it becomes the committed baseline
    pub fn acknowledge_commit(&mut self, submitted: SkillRanks) {
        let remaining = self
            .rules
            .set_cost(&submitted)
            .and_then(|spent| self.budget.total.checked_sub(spent));
        self.committed = submitted;
        self.pending = submitted;
        self.budget.remaining = remaining.unwrap_or(0);
        self.remaining = self.budget.remaining;
    }

    /// Rows for every skill in canonical order
    pub fn lines(&self) -> impl Iterator<Item = SkillLine> + '_ {
        self.pending.iter().map(move |(id, pending)| SkillLine {
            id,
            committed: self.committed.get(id).unwrap_or(0),
            pending,
            max_rank: self.rules.max_rank(id),
            cost: self.rules.rank_cost(id),
            class_skill: self.rules.is_class_skill(id),
        })
    }
}
