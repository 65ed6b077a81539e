use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Gem tags. A support may attach to a skill only when their tag sets intersect.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SkillTags: u16 {
        const PHYSICAL   = 1 << 0;
        const SPELL      = 1 << 1;
        const PROJECTILE = 1 << 2;
        const AOE        = 1 << 3;
        const MELEE      = 1 << 4;
        const FIRE       = 1 << 5;
        const COLD       = 1 << 6;
        const LIGHTNING  = 1 << 7;
        const CHANNEL    = 1 << 8;
        const DURATION   = 1 << 9;
        const QUICK      = 1 << 10;
    }
}

impl SkillTags {
    /// Returns true if a support tagged `support` may link to a skill tagged `self`.
    #[inline]
    pub fn accepts(self, support: SkillTags) -> bool {
        self.intersects(support)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_compatibility_requires_shared_tag() {
        let fireball = SkillTags::SPELL | SkillTags::PROJECTILE | SkillTags::FIRE;
        assert!(fireball.accepts(SkillTags::PROJECTILE));
        assert!(fireball.accepts(SkillTags::FIRE | SkillTags::MELEE));
        assert!(!fireball.accepts(SkillTags::MELEE | SkillTags::PHYSICAL));
        assert!(!fireball.accepts(SkillTags::empty()));
    }
}
