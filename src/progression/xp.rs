//! Experience and leveling
//!
//! XP thresholds as enforced by the ledger.

use serde::{Deserialize, Serialize};

/// XP needed to advance from `level` to `level + 1`, `None` past `u64`.
///
/// 1000 per level plus the sum of all previous levels' base, which folds
/// into `1000 * level * (level + 1) / 2`.
pub fn xp_required(level: u32) -> Option<u64> {
    let level = u64::from(level);
    level
        .checked_mul(level + 1)
        .map(|n| n / 2)
        .and_then(|n| n.checked_mul(1000))
}

/// Current XP and the threshold for the next level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub current: u64,
    pub next_threshold: u64,
}

impl Experience {
    pub fn new(current: u64, next_threshold: u64) -> Self {
        Self { current, next_threshold }
    }

    /// Level-up is allowed once current XP reaches the threshold
    pub fn can_level_up(&self) -> bool {
        self.current >= self.next_threshold
    }

    /// XP still missing before level-up
    pub fn missing(&self) -> u64 {
        self.next_threshold.saturating_sub(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_required() {
        assert_eq!(xp_required(1), Some(1000));
        assert_eq!(xp_required(2), Some(3000));
        assert_eq!(xp_required(3), Some(6000));
        assert_eq!(xp_required(4), Some(10000));
    }

    #[test]
    fn test_xp_required_overflow() {
        assert_eq!(xp_required(u32::MAX), None);
        assert_eq!(xp_required(100_000), Some(5_000_050_000_000));
    }

    #[test]
    fn test_can_level_up() {
        assert!(!Experience::new(999, 1000).can_level_up());
        assert!(Experience::new(1000, 1000).can_level_up());
        assert_eq!(Experience::new(250, 1000).missing(), 750);
        assert_eq!(Experience::new(2500, 1000).missing(), 0);
    }
}
