//! RON codex loader
//!
//! Loads the skill and class catalogs from RON files, falling back to the
//! built-in tables per file when a file is missing, unreadable or invalid.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::classes::{default_class_catalog, ClassCatalog, ClassDefinition, ClassId};
use super::skills::{default_skill_catalog, SkillCatalog, SkillDefinition, SkillId};

const SKILLS_FILE: &str = "skills.ron";
const CLASSES_FILE: &str = "classes.ron";

/// Codex loading and export errors
#[derive(Debug, Error)]
pub enum CodexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid codex data: {0}")]
    Invalid(String),
}

/// All static reference data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codex {
    pub skills: SkillCatalog,
    pub classes: ClassCatalog,
}

impl Codex {
    /// Load from `dir`, using defaults for anything that fails to load
    pub fn load(dir: &Path) -> Self {
        let skills = load_or_default(
            &dir.join(SKILLS_FILE),
            default_skill_catalog,
            SkillCatalog::validate,
        );
        let classes = load_or_default(
            &dir.join(CLASSES_FILE),
            default_class_catalog,
            ClassCatalog::validate,
        );
        Self { skills, classes }
    }

    pub fn skill(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills.find(id)
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassDefinition> {
        self.classes.find(id)
    }

    pub fn is_class_skill(&self, class: ClassId, skill: SkillId) -> bool {
        self.class(class).is_some_and(|c| c.is_class_skill(skill))
    }
}

impl Default for Codex {
    fn default() -> Self {
        Self {
            skills: default_skill_catalog(),
            classes: default_class_catalog(),
        }
    }
}

fn load_or_default<T>(
    path: &Path,
    default: fn() -> T,
    validate: fn(&T) -> Result<(), String>,
) -> T
where
    T: serde::de::DeserializeOwned,
{
    if !path.exists() {
        return default();
    }
    match read_ron(path, validate) {
        Ok(value) => {
            log::info!("Loaded codex data from {}", path.display());
            value
        }
        Err(e) => {
            log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            default()
        }
    }
}

fn read_ron<T>(path: &Path, validate: fn(&T) -> Result<(), String>) -> Result<T, CodexError>
where
    T: serde::de::DeserializeOwned,
{
    let content = fs::read_to_string(path)?;
    let value: T = ron::from_str(&content)?;
    validate(&value).map_err(CodexError::Invalid)?;
    Ok(value)
}

/// Export the built-in catalogs to RON files for editing
pub fn export_default_codex(dir: &Path) -> Result<(), CodexError> {
    fs::create_dir_all(dir)?;

    let pretty = ron::ser::PrettyConfig::default();
    let skills = ron::ser::to_string_pretty(&default_skill_catalog(), pretty.clone())?;
    fs::write(dir.join(SKILLS_FILE), skills)?;

    let classes = ron::ser::to_string_pretty(&default_class_catalog(), pretty)?;
    fs::write(dir.join(CLASSES_FILE), classes)?;

    log::info!("Exported default codex to {}", dir.display());
    Ok(())
}
