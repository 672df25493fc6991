//! Summoner Skills - skill allocation for ledger-backed summoners
//!
//! Reads a summoner's committed skill ranks and skill-point budget from the
//! ledger, validates rank-by-rank edits against class caps and the budget,
//! and submits the finished allocation.

pub mod allocation;
pub mod cli;
pub mod codex;
pub mod config;
pub mod ledger;
pub mod panel;
pub mod progression;

// Re-export commonly used types
pub use allocation::{Budget, RankRules, SkillAllocation, SkillRanks};
pub use codex::Codex;
pub use ledger::{InMemoryLedger, Ledger, LedgerError, TxReceipt};
pub use panel::{SessionSignal, SkillsPanel};
