//! Summoner identity as read from the ledger

use serde::{Deserialize, Serialize};

use crate::codex::ClassId;

/// Ledger token id of a summoner
pub type SummonerId = u64;

/// A summoner's class and level.
///
/// Read-only from the allocation engine's point of view; only the ledger
/// changes it (level-up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: SummonerId,
    pub class: ClassId,
    pub level: u32,
}

impl Character {
    pub fn new(id: SummonerId, class: ClassId, level: u32) -> Self {
        Self { id, class, level }
    }

    /// Level 0 means the ledger has no data for this summoner yet
    pub fn has_level(&self) -> bool {
        self.level > 0
    }
}
