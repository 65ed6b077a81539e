use arrayvec::ArrayVec;
use serde::{Deserialize, Deserializer, Serialize};

use super::common::{Rarity, SkillId, SupportId};
use super::registry::Keyed;
use super::tags::SkillTags;
use crate::config::GameConfig;

/// Support gems linked to a skill, in attachment order.
pub type SupportLinks = ArrayVec<SupportId, { GameConfig::MAX_SUPPORTS_PER_SKILL }>;

/// Base values and per-level deltas of an active skill.
///
/// Per-level deltas apply for every level above 1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillScaling {
    pub base_damage: f64,
    pub damage_per_level: f64,
    pub base_mana_cost: f64,
    pub mana_cost_per_level: f64,
    pub base_cooldown_ms: f64,
    pub cooldown_per_level: f64,
    pub base_area: f64,
    pub area_per_level: f64,
    pub base_duration_ms: f64,
    pub duration_per_level: f64,
    pub base_range: f64,
    pub range_per_level: f64,
    pub base_projectiles: u32,
}

/// An active skill gem owned by the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillGem {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub level: u32,
    pub max_level: u32,
    #[serde(default)]
    pub rarity: Rarity,
    /// Quality percent; each point grants 1% increased damage.
    #[serde(default)]
    pub quality: u32,
    pub tags: SkillTags,
    #[serde(default)]
    pub scaling: SkillScaling,
    /// Minimum character level to unlock.
    #[serde(default)]
    pub unlock_level: u32,
    /// Skill points spent to unlock.
    #[serde(default)]
    pub unlock_cost: u32,
    #[serde(default, deserialize_with = "lenient_links")]
    pub supports: SupportLinks,
    #[serde(default)]
    pub is_unlocked: bool,
    #[serde(default)]
    pub is_equipped: bool,
}

impl SkillGem {
    /// Skill points needed to raise this gem one level.
    pub fn level_up_cost(&self) -> u32 {
        self.level.max(1).div_ceil(5)
    }

    pub fn is_at_max_level(&self) -> bool {
        self.level >= self.max_level
    }

    pub fn has_support(&self, support: &SupportId) -> bool {
        self.supports.iter().any(|id| id == support)
    }

    pub fn is_channel(&self) -> bool {
        self.tags.contains(SkillTags::CHANNEL)
    }
}

/// Accepts any number of links: duplicates are dropped and the list is cut to
/// capacity so an overfull save still loads.
fn lenient_links<'de, D>(deserializer: D) -> Result<SupportLinks, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = Vec::<SupportId>::deserialize(deserializer)?;
    let mut links = SupportLinks::new();
    for id in ids {
        if links.is_full() {
            break;
        }
        if !links.contains(&id) {
            links.push(id);
        }
    }
    Ok(links)
}

impl Keyed for SkillGem {
    type Key = SkillId;

    fn key(&self) -> &SkillId {
        &self.id
    }
}
