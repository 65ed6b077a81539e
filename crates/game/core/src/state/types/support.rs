use serde::{Deserialize, Serialize};

use super::common::SupportId;
use super::registry::Keyed;
use super::tags::SkillTags;

/// Which skill value a support modifier adjusts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModifierKind {
    Damage,
    /// Multiplies damage by the raw value (e.g. `0.75`).
    DamageMultiplier,
    ManaCost,
    Cooldown,
    AreaOfEffect,
    Duration,
    Range,
    ProjectileCount,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupportModifier {
    #[serde(rename = "type")]
    pub kind: ModifierKind,
    pub value: f64,
    /// Added to `value` for every support level above 1.
    #[serde(default)]
    pub per_level: f64,
    #[serde(default)]
    pub is_percentage: bool,
    #[serde(default)]
    pub description: String,
}

impl SupportModifier {
    pub fn value_at(&self, level: u32) -> f64 {
        self.value + self.per_level * level.saturating_sub(1) as f64
    }
}

/// A support gem owned by the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupportGem {
    pub id: SupportId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub level: u32,
    pub max_level: u32,
    pub tags: SkillTags,
    #[serde(default)]
    pub modifiers: Vec<SupportModifier>,
    #[serde(default)]
    pub unlock_level: u32,
    #[serde(default)]
    pub unlock_cost: u32,
    #[serde(default)]
    pub is_unlocked: bool,
}

impl SupportGem {
    pub fn level_up_cost(&self) -> u32 {
        self.level.max(1).div_ceil(5)
    }

    pub fn is_at_max_level(&self) -> bool {
        self.level >= self.max_level
    }
}

impl Keyed for SupportGem {
    type Key = SupportId;

    fn key(&self) -> &SupportId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_value_scales_with_level() {
        let modifier = SupportModifier {
            kind: ModifierKind::Damage,
            value: 20.0,
            per_level: 2.5,
            is_percentage: true,
            description: String::new(),
        };
        assert_eq!(modifier.value_at(1), 20.0);
        assert_eq!(modifier.value_at(5), 30.0);
        assert_eq!(modifier.value_at(0), 20.0);
    }

    #[test]
    fn modifier_kind_uses_type_field() {
        let json = r#"{"type":"area_of_effect","value":25.0,"is_percentage":true}"#;
        let modifier: SupportModifier = serde_json::from_str(json).unwrap();
        assert_eq!(modifier.kind, ModifierKind::AreaOfEffect);
        assert_eq!(modifier.per_level, 0.0);
    }
}
