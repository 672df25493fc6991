//! Progression rules
//!
//! Character identity, experience thresholds and the skill-point formula.

pub mod character;
pub mod points;
pub mod xp;

pub use character::{Character, SummonerId};
pub use points::{attribute_modifier, skill_points};
pub use xp::{xp_required, Experience};
