use crate::state::{Rarity, SkillTags};

/// Tier bonuses applied to a skill gem of a given rarity.
///
/// Area, projectile and duration bonuses only apply when the skill carries
/// the matching tag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RarityBonus {
    pub damage_pct: f64,
    /// Requires [`SkillTags::AOE`].
    pub area_pct: f64,
    /// Requires [`SkillTags::PROJECTILE`].
    pub extra_projectiles: u32,
    pub cooldown_reduction_pct: f64,
    /// Requires [`SkillTags::DURATION`].
    pub duration_pct: f64,
}

impl RarityBonus {
    pub const fn for_rarity(rarity: Rarity) -> Self {
        match rarity {
            Rarity::Common => Self {
                damage_pct: 0.0,
                area_pct: 0.0,
                extra_projectiles: 0,
                cooldown_reduction_pct: 0.0,
                duration_pct: 0.0,
            },
            Rarity::Magic => Self {
                damage_pct: 10.0,
                area_pct: 5.0,
                extra_projectiles: 0,
                cooldown_reduction_pct: 0.0,
                duration_pct: 5.0,
            },
            Rarity::Rare => Self {
                damage_pct: 20.0,
                area_pct: 10.0,
                extra_projectiles: 0,
                cooldown_reduction_pct: 5.0,
                duration_pct: 10.0,
            },
            Rarity::Epic => Self {
                damage_pct: 35.0,
                area_pct: 15.0,
                extra_projectiles: 1,
                cooldown_reduction_pct: 10.0,
                duration_pct: 15.0,
            },
            Rarity::Legendary => Self {
                damage_pct: 50.0,
                area_pct: 25.0,
                extra_projectiles: 1,
                cooldown_reduction_pct: 15.0,
                duration_pct: 25.0,
            },
        }
    }

    /// Drops the bonuses whose gating tag `tags` lacks.
    pub fn gated_by(self, tags: SkillTags) -> Self {
        Self {
            area_pct: if tags.contains(SkillTags::AOE) { self.area_pct } else { 0.0 },
            extra_projectiles: if tags.contains(SkillTags::PROJECTILE) {
                self.extra_projectiles
            } else {
                0
            },
            duration_pct: if tags.contains(SkillTags::DURATION) {
                self.duration_pct
            } else {
                0.0
            },
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_has_no_bonus() {
        assert_eq!(RarityBonus::for_rarity(Rarity::Common), RarityBonus::default());
    }

    #[test]
    fn tag_gating_removes_unrelated_bonuses() {
        let bonus = RarityBonus::for_rarity(Rarity::Legendary).gated_by(SkillTags::SPELL);
        assert_eq!(bonus.area_pct, 0.0);
        assert_eq!(bonus.extra_projectiles, 0);
        assert_eq!(bonus.duration_pct, 0.0);
        assert_eq!(bonus.damage_pct, 50.0);

        let aoe = RarityBonus::for_rarity(Rarity::Legendary).gated_by(SkillTags::AOE);
        assert_eq!(aoe.area_pct, 25.0);
    }
}
