//! Skill catalog
//!
//! The 36 trainable skills. Skill ids are dense (1..=36) and the
//! ascending id order is the canonical order used on the ledger.

use serde::{Deserialize, Serialize};

use super::attributes::Attribute;

/// Unique skill ID
pub type SkillId = u32;

/// Number of skills in the catalog
pub const SKILL_COUNT: usize = 36;

/// A skill definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    /// Key attribute for checks with this skill
    pub attribute: Attribute,
    /// Skill that grants a synergy bonus to this one
    pub synergy: Option<SkillId>,
    /// Whether armor check penalty applies
    pub armor_check_penalty: bool,
}

/// Collection of skill definitions, ordered by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

impl SkillCatalog {
    /// Find a skill by ID
    pub fn find(&self, id: SkillId) -> Option<&SkillDefinition> {
        let index = (id as usize).checked_sub(1)?;
        self.skills.get(index).filter(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Check ids are exactly 1..=SKILL_COUNT in order and synergies resolve
    pub fn validate(&self) -> Result<(), String> {
        if self.skills.len() != SKILL_COUNT {
            return Err(format!(
                "expected {} skills, found {}",
                SKILL_COUNT,
                self.skills.len()
            ));
        }
        for (index, skill) in self.skills.iter().enumerate() {
            let expected = index as SkillId + 1;
            if skill.id != expected {
                return Err(format!(
                    "skill at position {} has id {}, expected {}",
                    index, skill.id, expected
                ));
            }
            if let Some(synergy) = skill.synergy {
                if synergy == skill.id || synergy == 0 || synergy as usize > SKILL_COUNT {
                    return Err(format!(
                        "skill {} has invalid synergy {}",
                        skill.id, synergy
                    ));
                }
            }
        }
        Ok(())
    }
}

fn skill(
    id: SkillId,
    name: &str,
    attribute: Attribute,
    synergy: Option<SkillId>,
    armor_check_penalty: bool,
) -> SkillDefinition {
    SkillDefinition {
        id,
        name: name.to_string(),
        attribute,
        synergy,
        armor_check_penalty,
    }
}

/// Built-in skill catalog
pub fn default_skill_catalog() -> SkillCatalog {
    use Attribute::*;

    SkillCatalog {
        skills: vec![
            skill(1, "Appraise", Intelligence, None, false),
            skill(2, "Balance", Dexterity, Some(34), true),
            skill(3, "Bluff", Charisma, None, false),
            skill(4, "Climb", Strength, Some(36), true),
            skill(5, "Concentration", Constitution, None, false),
            skill(6, "Craft", Intelligence, None, false),
            skill(7, "Decipher Script", Intelligence, None, false),
            skill(8, "Diplomacy", Charisma, Some(27), false),
            skill(9, "Disable Device", Intelligence, None, false),
            skill(10, "Disguise", Charisma, Some(3), false),
            skill(11, "Escape Artist", Dexterity, Some(36), true),
            skill(12, "Forgery", Intelligence, None, false),
            skill(13, "Gather Information", Charisma, None, false),
            skill(14, "Handle Animal", Charisma, None, false),
            skill(15, "Heal", Wisdom, None, false),
            skill(16, "Hide", Dexterity, None, true),
            skill(17, "Intimidate", Charisma, Some(3), false),
            skill(18, "Jump", Strength, Some(34), true),
            skill(19, "Knowledge", Intelligence, None, false),
            skill(20, "Listen", Wisdom, None, false),
            skill(21, "Move Silently", Dexterity, None, true),
            skill(22, "Open Lock", Dexterity, None, false),
            skill(23, "Perform", Charisma, None, false),
            skill(24, "Profession", Wisdom, None, false),
            skill(25, "Ride", Dexterity, Some(14), false),
            skill(26, "Search", Intelligence, None, false),
            skill(27, "Sense Motive", Wisdom, None, false),
            skill(28, "Sleight of Hand", Dexterity, Some(3), true),
            skill(29, "Speak Language", Intelligence, None, false),
            skill(30, "Spellcraft", Intelligence, Some(19), false),
            skill(31, "Spot", Wisdom, None, false),
            skill(32, "Survival", Wisdom, Some(26), false),
            skill(33, "Swim", Strength, None, true),
            skill(34, "Tumble", Dexterity, Some(18), true),
            skill(35, "Use Magic Device", Charisma, Some(7), false),
            skill(36, "Use Rope", Dexterity, Some(11), false),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = default_skill_catalog();
        assert_eq!(catalog.len(), SKILL_COUNT);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_find() {
        let catalog = default_skill_catalog();
        assert_eq!(catalog.find(1).map(|s| s.name.as_str()), Some("Appraise"));
        assert_eq!(catalog.find(36).map(|s| s.name.as_str()), Some("Use Rope"));
        assert!(catalog.find(0).is_none());
        assert!(catalog.find(37).is_none());
    }

    #[test]
    fn test_validate_rejects_gaps() {
        let mut catalog = default_skill_catalog();
        catalog.skills.remove(4);
        assert!(catalog.validate().is_err());

        let mut catalog = default_skill_catalog();
        catalog.skills[3].id = 40;
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_self_synergy() {
        let mut catalog = default_skill_catalog();
        catalog.skills[0].synergy = Some(1);
        assert!(catalog.validate().is_err());
    }
}
