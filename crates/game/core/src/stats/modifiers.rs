//! Support gem modifier fold.
//!
//! Modifiers apply one at a time in attachment order. Percentage modifiers
//! multiply by `1 + v/100`, flat modifiers add `v`, and `damage_multiplier`
//! multiplies damage by the raw factor so several of them compound.
use crate::state::{ModifierKind, SupportGem, SupportModifier};

/// Mutable working values of a skill while modifiers are folded in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SkillValues {
    pub damage: f64,
    pub mana_cost: f64,
    pub cooldown_ms: f64,
    pub area: f64,
    pub duration_ms: f64,
    pub range: f64,
    pub projectiles: f64,
}

impl SkillValues {
    fn slot(&mut self, kind: ModifierKind) -> &mut f64 {
        match kind {
            ModifierKind::Damage | ModifierKind::DamageMultiplier => &mut self.damage,
            ModifierKind::ManaCost => &mut self.mana_cost,
            ModifierKind::Cooldown => &mut self.cooldown_ms,
            ModifierKind::AreaOfEffect => &mut self.area,
            ModifierKind::Duration => &mut self.duration_ms,
            ModifierKind::Range => &mut self.range,
            ModifierKind::ProjectileCount => &mut self.projectiles,
        }
    }

    /// Applies one modifier at the given support level.
    pub fn apply(&mut self, modifier: &SupportModifier, support_level: u32) {
        let value = modifier.value_at(support_level);
        let target = self.slot(modifier.kind);
        if modifier.kind == ModifierKind::DamageMultiplier {
            *target *= value;
        } else if modifier.is_percentage {
            *target *= 1.0 + value / 100.0;
        } else {
            *target += value;
        }
    }

    /// Folds every modifier of every support, in order.
    pub fn apply_supports(&mut self, supports: &[&SupportGem]) {
        for support in supports {
            for modifier in &support.modifiers {
                self.apply(modifier, support.level);
            }
        }
    }

    /// Clamps values into their valid ranges.
    pub fn clamped(self) -> Self {
        Self {
            damage: self.damage.max(0.0),
            mana_cost: self.mana_cost.max(0.0),
            cooldown_ms: self.cooldown_ms.max(0.0),
            area: self.area.max(0.0),
            duration_ms: self.duration_ms.max(0.0),
            range: self.range.max(0.0),
            projectiles: self.projectiles.max(1.0),
        }
    }
}
