//! Skill allocation engine
//!
//! Committed and pending rank sets, the skill-point budget and the
//! validated edits that move between them.

pub mod budget;
pub mod engine;
pub mod ranks;
pub mod rules;

pub use budget::{compute_budget, Budget};
pub use engine::{AllocationError, SkillAllocation, SkillLine};
pub use ranks::{RanksLengthError, SkillRanks};
pub use rules::RankRules;
