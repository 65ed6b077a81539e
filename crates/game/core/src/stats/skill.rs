//! Effective skill stat resolution.
//!
//! Order: level scaling → support modifiers (attachment order) → quality and
//! rarity → attribute bonuses → flat damage from equipment and stones.
use serde::{Deserialize, Serialize};

use super::bonus::{Bonus, BonusStack};
use super::derived::DerivedStats;
use super::modifiers::SkillValues;
use super::rarity::RarityBonus;
use crate::config::GameConfig;
use crate::state::{Player, SkillGem, SkillTags, SupportGem};

/// Final, read-only values of a skill.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectiveSkillStats {
    pub damage: f64,
    pub mana_cost: f64,
    /// Zero means the skill may fire on every tick.
    pub cooldown_ms: u64,
    pub area: f64,
    pub duration_ms: u64,
    pub range: f64,
    pub projectiles: u32,
}

/// Base template values scaled to the gem's level.
pub fn scaled_values(skill: &SkillGem) -> SkillValues {
    let s = &skill.scaling;
    let steps = skill.level.saturating_sub(1) as f64;
    SkillValues {
        damage: s.base_damage + steps * s.damage_per_level,
        mana_cost: s.base_mana_cost + steps * s.mana_cost_per_level,
        cooldown_ms: s.base_cooldown_ms + steps * s.cooldown_per_level,
        area: s.base_area + steps * s.area_per_level,
        duration_ms: s.base_duration_ms + steps * s.duration_per_level,
        range: s.base_range + steps * s.range_per_level,
        projectiles: f64::from(s.base_projectiles.max(1)),
    }
}

/// Resolves `skill` with `supports` applied in order and, when given, the
/// player's bonuses. Never mutates its inputs.
pub fn resolve_skill(
    skill: &SkillGem,
    supports: &[&SupportGem],
    player: Option<&Player>,
) -> EffectiveSkillStats {
    resolve_with_stats(skill, supports, player.map(|p| &p.stats))
}

/// Same as [`resolve_skill`] with the player bonuses given directly.
pub fn resolve_with_stats(
    skill: &SkillGem,
    supports: &[&SupportGem],
    stats: Option<&DerivedStats>,
) -> EffectiveSkillStats {
    let mut values = scaled_values(skill);
    values.apply_supports(supports);

    let rarity = RarityBonus::for_rarity(skill.rarity).gated_by(skill.tags);
    let mut damage = BonusStack::new();
    damage.add(Bonus::more(rarity.damage_pct));
    damage.add(Bonus::more(f64::from(skill.quality)));

    let mut flat_damage = 0.0;
    if let Some(stats) = stats {
        damage.extend(attribute_bonuses(skill.tags, stats));
        if stats.increased_damage_pct != 0.0 {
            damage.add(Bonus::increased(stats.increased_damage_pct));
        }
        flat_damage = stats.flat_damage;
    }

    values.damage = damage.apply_non_negative(values.damage) + flat_damage;
    values.area *= 1.0 + rarity.area_pct / 100.0;
    values.duration_ms *= 1.0 + rarity.duration_pct / 100.0;
    values.cooldown_ms *= 1.0 - rarity.cooldown_reduction_pct / 100.0;
    values.projectiles += f64::from(rarity.extra_projectiles);

    let values = values.clamped();
    EffectiveSkillStats {
        damage: values.damage,
        mana_cost: values.mana_cost,
        cooldown_ms: values.cooldown_ms.round() as u64,
        area: values.area,
        duration_ms: values.duration_ms.round() as u64,
        range: values.range,
        projectiles: values.projectiles.floor() as u32,
    }
}

/// Percentage damage bonuses from attributes above the threshold, gated by tag.
fn attribute_bonuses(tags: SkillTags, stats: &DerivedStats) -> Vec<Bonus> {
    let attrs = &stats.attributes;
    [
        (SkillTags::PHYSICAL, attrs.strength),
        (SkillTags::SPELL, attrs.intelligence),
        (SkillTags::PROJECTILE, attrs.dexterity),
    ]
    .into_iter()
    .filter(|(tag, _)| tags.contains(*tag))
    .filter_map(|(_, value)| {
        let excess = value.saturating_sub(GameConfig::ATTRIBUTE_BONUS_THRESHOLD);
        (excess > 0)
            .then(|| Bonus::increased(f64::from(excess) * GameConfig::ATTRIBUTE_BONUS_PER_POINT))
    })
    .collect()
}
