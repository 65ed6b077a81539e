//! Persisted save shape.
//!
//! Every field is optional so partial or older saves still deserialize; the
//! `Load` action repairs whatever is missing.
use serde::{Deserialize, Serialize};

use super::GameState;
use super::types::{Enemy, Item, Player, SkillGem, SkillId, SupportGem};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsSnapshot {
    pub skill_gems: Option<Vec<SkillGem>>,
    pub support_gems: Option<Vec<SupportGem>>,
    pub skill_bar: Option<Vec<Option<SkillId>>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveSnapshot {
    pub player: Option<Player>,
    pub inventory: Option<Vec<Item>>,
    pub enemies: Option<Vec<Enemy>>,
    pub skills: Option<SkillsSnapshot>,
}

impl SaveSnapshot {
    /// Captures the persistable parts of `state`.
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            player: Some(player.clone()),
            inventory: Some(state.inventory.clone()),
            enemies: Some(state.enemies.as_slice().to_vec()),
            skills: Some(SkillsSnapshot {
                skill_gems: Some(player.skill_gems.as_slice().to_vec()),
                support_gems: Some(player.support_gems.as_slice().to_vec()),
                skill_bar: Some(player.skill_bar.slots().to_vec()),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.player.is_none()
            && self.inventory.is_none()
            && self.enemies.is_none()
            && self.skills.is_none()
    }
}
