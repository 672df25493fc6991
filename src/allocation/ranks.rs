//! Fixed-size skill rank set

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codex::{SkillId, SKILL_COUNT};

/// A rank list did not have one entry per skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {} skill ranks, found {}", SKILL_COUNT, .0)]
pub struct RanksLengthError(pub usize);

/// Rank per skill, indexed by `skill id - 1`.
///
/// Iteration is always in ascending skill id, which is the parameter order
/// the ledger expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct SkillRanks([u32; SKILL_COUNT]);

impl SkillRanks {
    pub fn zero() -> Self {
        Self([0; SKILL_COUNT])
    }

    pub fn from_array(ranks: [u32; SKILL_COUNT]) -> Self {
        Self(ranks)
    }

    fn index(id: SkillId) -> Option<usize> {
        let index = (id as usize).checked_sub(1)?;
        (index < SKILL_COUNT).then_some(index)
    }

    /// Rank of a skill, `None` for ids outside the catalog
    pub fn get(&self, id: SkillId) -> Option<u32> {
        Self::index(id).map(|i| self.0[i])
    }

    /// Set a rank; returns false for unknown ids
    pub fn set(&mut self, id: SkillId, rank: u32) -> bool {
        match Self::index(id) {
            Some(i) => {
                self.0[i] = rank;
                true
            }
            None => false,
        }
    }

    /// `(skill id, rank)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (SkillId, u32)> + '_ {
        self.0.iter().enumerate().map(|(i, &rank)| (i as SkillId + 1, rank))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.0.to_vec()
    }

    /// Sum of all ranks
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

impl Default for SkillRanks {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<Vec<u32>> for SkillRanks {
    type Error = RanksLengthError;

    fn try_from(ranks: Vec<u32>) -> Result<Self, Self::Error> {
        let len = ranks.len();
        let array: [u32; SKILL_COUNT] = ranks.try_into().map_err(|_| RanksLengthError(len))?;
        Ok(Self(array))
    }
}

impl TryFrom<&[u32]> for SkillRanks {
    type Error = RanksLengthError;

    fn try_from(ranks: &[u32]) -> Result<Self, Self::Error> {
        let array: [u32; SKILL_COUNT] =
            ranks.try_into().map_err(|_| RanksLengthError(ranks.len()))?;
        Ok(Self(array))
    }
}

impl From<SkillRanks> for Vec<u32> {
    fn from(ranks: SkillRanks) -> Self {
        ranks.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let mut ranks = SkillRanks::zero();
        assert!(ranks.set(1, 3));
        assert!(ranks.set(36, 2));
        assert!(!ranks.set(0, 1));
        assert!(!ranks.set(37, 1));

        assert_eq!(ranks.get(1), Some(3));
        assert_eq!(ranks.get(36), Some(2));
        assert_eq!(ranks.get(37), None);
        assert_eq!(ranks.total(), 5);
    }

    #[test]
    fn test_iteration_order() {
        let mut ranks = SkillRanks::zero();
        ranks.set(5, 1);
        let ids: Vec<SkillId> = ranks.iter().map(|(id, _)| id).collect();
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&36));
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ranks.as_slice()[4], 1);
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert_eq!(SkillRanks::try_from(vec![0; 35]), Err(RanksLengthError(35)));
        assert!(SkillRanks::try_from(vec![0; 36]).is_ok());
        assert!(SkillRanks::try_from(&[1u32; 36][..]).is_ok());
    }

    #[test]
    fn test_json_shape() {
        let mut ranks = SkillRanks::zero();
        ranks.set(2, 4);
        let json = serde_json::to_string(&ranks).unwrap();
        assert!(json.starts_with("[0,4,0"));
        let back: SkillRanks = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ranks);
        assert!(serde_json::from_str::<SkillRanks>("[1,2,3]").is_err());
    }
}
