//! Class catalog
//!
//! Each class decides which skills are class skills and how many skill
//! points it earns per level before the intelligence modifier.

use serde::{Deserialize, Serialize};

use super::skills::{SkillId, SKILL_COUNT};

/// Unique class ID (1-based, as on the ledger)
pub type ClassId = u32;

/// A class definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub id: ClassId,
    pub name: String,
    /// Portrait asset path
    pub image: String,
    /// Base skill points per level
    pub skill_points: u32,
    /// Skills that are class skills for this class
    pub class_skills: Vec<SkillId>,
}

impl ClassDefinition {
    pub fn is_class_skill(&self, skill: SkillId) -> bool {
        self.class_skills.contains(&skill)
    }

    /// Class-skill flags indexed by `skill id - 1`
    pub fn class_skill_flags(&self) -> [bool; SKILL_COUNT] {
        let mut flags = [false; SKILL_COUNT];
        for &id in &self.class_skills {
            if let Some(slot) = (id as usize).checked_sub(1).and_then(|i| flags.get_mut(i)) {
                *slot = true;
            }
        }
        flags
    }
}

/// Collection of class definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<ClassDefinition>,
}

impl ClassCatalog {
    /// Find a class by ID
    pub fn find(&self, id: ClassId) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.iter()
    }

    /// Check class ids are unique and class skills exist
    pub fn validate(&self) -> Result<(), String> {
        for (index, class) in self.classes.iter().enumerate() {
            if self.classes[..index].iter().any(|c| c.id == class.id) {
                return Err(format!("duplicate class id {}", class.id));
            }
            if let Some(bad) = class
                .class_skills
                .iter()
                .find(|&&s| s == 0 || s as usize > SKILL_COUNT)
            {
                return Err(format!("class {} lists unknown skill {}", class.name, bad));
            }
        }
        Ok(())
    }
}

fn class(id: ClassId, name: &str, skill_points: u32, class_skills: &[SkillId]) -> ClassDefinition {
    ClassDefinition {
        id,
        name: name.to_string(),
        image: format!("img/classes/{}.png", name.to_lowercase()),
        skill_points,
        class_skills: class_skills.to_vec(),
    }
}

/// Built-in class catalog
pub fn default_class_catalog() -> ClassCatalog {
    ClassCatalog {
        classes: vec![
            class(1, "Barbarian", 4, &[4, 6, 14, 17, 18, 20, 25, 32, 33]),
            class(
                2,
                "Bard",
                6,
                &[
                    1, 2, 3, 4, 5, 6, 7, 8, 10, 11, 13, 16, 18, 19, 20, 21, 23, 24, 27, 28, 29, 30,
                    33, 34, 35,
                ],
            ),
            class(3, "Cleric", 2, &[5, 6, 8, 15, 19, 24, 30]),
            class(4, "Druid", 4, &[5, 6, 8, 14, 15, 19, 20, 24, 25, 30, 31, 32, 33]),
            class(5, "Fighter", 2, &[4, 6, 14, 17, 18, 25, 33]),
            class(
                6,
                "Monk",
                4,
                &[2, 4, 5, 6, 8, 11, 16, 18, 19, 20, 21, 23, 24, 27, 31, 33, 34],
            ),
            class(7, "Paladin", 2, &[5, 6, 8, 14, 15, 19, 24, 25, 27]),
            class(
                8,
                "Ranger",
                6,
                &[4, 5, 6, 14, 15, 16, 18, 19, 20, 21, 24, 25, 26, 31, 32, 33, 36],
            ),
            class(
                9,
                "Rogue",
                8,
                &[
                    1, 2, 3, 4, 6, 7, 8, 9, 10, 11, 12, 13, 16, 17, 18, 19, 20, 21, 22, 23, 24, 26,
                    27, 28, 31, 33, 34, 35, 36,
                ],
            ),
            class(10, "Sorcerer", 2, &[3, 5, 6, 19, 24, 30]),
            class(11, "Wizard", 2, &[5, 6, 7, 19, 24, 30]),
        ],
    }
}
