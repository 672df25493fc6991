//! Static reference data
//!
//! Skill catalog, class catalog and attributes. Loaded from RON files
//! with fallback to the built-in tables.

pub mod attributes;
pub mod classes;
pub mod loader;
pub mod skills;

pub use attributes::{Attribute, AttributeScores};
pub use classes::{default_class_catalog, ClassCatalog, ClassDefinition, ClassId};
pub use loader::{export_default_codex, Codex, CodexError};
pub use skills::{default_skill_catalog, SkillCatalog, SkillDefinition, SkillId, SKILL_COUNT};
