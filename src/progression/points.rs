//! Skill point formula
//!
//! Reference implementation of the ledger-side budget. The allocation engine
//! never calls this directly; it always asks the ledger.

/// Standard attribute modifier, rounded toward negative infinity
pub fn attribute_modifier(score: u32) -> i64 {
    (i64::from(score) - 10).div_euclid(2)
}

/// Total skill points for a class base, intelligence score and level.
///
/// At least one point per level is granted regardless of the modifier.
/// `None` when the total does not fit in a `u32`.
pub fn skill_points(class_base: u32, intelligence: u32, level: u32) -> Option<u32> {
    let per_level = (i64::from(class_base) + attribute_modifier(intelligence)).max(1);
    u32::try_from(per_level)
        .ok()?
        .checked_mul(level.checked_add(3)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_modifier() {
        assert_eq!(attribute_modifier(10), 0);
        assert_eq!(attribute_modifier(11), 0);
        assert_eq!(attribute_modifier(14), 2);
        assert_eq!(attribute_modifier(9), -1);
        assert_eq!(attribute_modifier(8), -1);
        assert_eq!(attribute_modifier(3), -4);
        assert_eq!(attribute_modifier(u32::MAX), 2_147_483_642);
    }

    #[test]
    fn test_skill_points() {
        // Rogue, INT 10, level 1
        assert_eq!(skill_points(8, 10, 1), Some(32));
        // Wizard, INT 16, level 2
        assert_eq!(skill_points(2, 16, 2), Some(25));
        // Fighter with INT 3 still earns one point per level
        assert_eq!(skill_points(2, 3, 1), Some(4));
    }

    #[test]
    fn test_skill_points_overflow() {
        assert_eq!(skill_points(2, 10, u32::MAX), None);
        assert_eq!(skill_points(2, 10, u32::MAX - 3), None);
        assert_eq!(skill_points(8, u32::MAX, 1), None);
        assert_eq!(skill_points(1, 10, u32::MAX - 3), Some(u32::MAX));
    }
}
