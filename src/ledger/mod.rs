//! Ledger collaborator
//!
//! The calls the skills panel makes against the game ledger, the
//! transaction receipt it gets back, and an in-memory ledger that enforces
//! the same rules.

pub mod memory;
pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::allocation::SkillRanks;
use crate::codex::{AttributeScores, ClassId};
use crate::progression::{Character, Experience, SummonerId};

pub use memory::{InMemoryLedger, LedgerState, SummonerRecord};
pub use store::{default_ledger_path, load_ledger, save_ledger, StoreError};

/// Ledger call failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("summoner {0} does not exist")]
    UnknownSummoner(SummonerId),
    #[error("unknown class {0}")]
    UnknownClass(ClassId),
    #[error("transaction rejected: {0}")]
    Rejected(String),
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub hash: String,
    pub success: bool,
    pub summary: Option<String>,
}

impl TxReceipt {
    pub fn new(hash: impl Into<String>, success: bool, summary: Option<String>) -> Self {
        Self {
            hash: hash.into(),
            success,
            summary,
        }
    }

    /// Summary if there is one, otherwise an abbreviated hash
    pub fn title(&self) -> String {
        match &self.summary {
            Some(summary) => summary.clone(),
            None => format!(
                "Hash: {}...{}",
                abbreviate(&self.hash, 0, 8),
                abbreviate(&self.hash, 58, 65)
            ),
        }
    }
}

fn abbreviate(hash: &str, start: usize, end: usize) -> &str {
    let end = end.min(hash.len());
    hash.get(start.min(end)..end).unwrap_or("")
}

/// Reads and writes against the game ledger.
///
/// Every call may fail with [`LedgerError`]; callers treat a failure as
/// "nothing happened" and keep their current state.
pub trait Ledger {
    /// Class and level of a summoner
    fn summoner(&self, id: SummonerId) -> Result<Character, LedgerError>;

    /// Current XP and the threshold to leave `level`
    fn experience(&self, id: SummonerId, level: u32) -> Result<Experience, LedgerError>;

    /// Committed skill ranks in canonical order
    fn committed_skills(&self, id: SummonerId) -> Result<SkillRanks, LedgerError>;

    /// Attribute scores (all zero when never assigned)
    fn attributes(&self, id: SummonerId) -> Result<AttributeScores, LedgerError>;

    /// Total skill points for the given inputs
    fn point_budget(
        &self,
        intelligence: u32,
        class: ClassId,
        level: u32,
    ) -> Result<u32, LedgerError>;

    /// Replace the committed ranks
    fn submit_skill_ranks(
        &self,
        id: SummonerId,
        ranks: &SkillRanks,
    ) -> Result<TxReceipt, LedgerError>;

    /// Spend XP to gain a level
    fn level_up(&self, id: SummonerId) -> Result<TxReceipt, LedgerError>;
}
