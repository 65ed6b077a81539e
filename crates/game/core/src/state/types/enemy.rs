use serde::{Deserialize, Serialize};

use super::common::{EnemyId, Position, Timestamp};
use super::registry::Keyed;
use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EnemyState {
    #[default]
    Alive,
    /// Defeated and fading out; removed once the death grace elapses.
    Dying,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub name: String,
    pub level: u32,
    pub hp: f64,
    pub max_hp: f64,
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub state: EnemyState,
    #[serde(default = "full_alpha")]
    pub alpha: f32,
    #[serde(default)]
    pub death_time: Option<Timestamp>,
}

fn full_alpha() -> f32 {
    1.0
}

impl Enemy {
    pub fn new(id: EnemyId, name: impl Into<String>, level: u32, max_hp: f64) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            hp: max_hp,
            max_hp,
            is_boss: false,
            position: None,
            state: EnemyState::Alive,
            alpha: 1.0,
            death_time: None,
        }
    }

    pub fn boss(mut self) -> Self {
        self.is_boss = true;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Alive and still has hit points.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == EnemyState::Alive && self.hp > 0.0
    }

    /// Applies `damage`, clamping hp at zero. Returns the damage actually dealt.
    pub fn take_damage(&mut self, damage: f64) -> f64 {
        let dealt = damage.max(0.0).min(self.hp.max(0.0));
        self.hp = (self.hp - damage.max(0.0)).max(0.0);
        dealt
    }

    pub fn mark_dying(&mut self, now: Timestamp) {
        self.state = EnemyState::Dying;
        self.alpha = 1.0;
        self.death_time = Some(now);
    }

    /// Dying for at least the death grace period.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        match (self.state, self.death_time) {
            (EnemyState::Dying, Some(died)) => now.since(died) >= GameConfig::DEATH_GRACE_MS,
            (EnemyState::Dying, None) => true,
            _ => false,
        }
    }

    /// Experience granted on defeat.
    pub fn xp_reward(&self) -> u64 {
        let level = u64::from(self.level);
        if self.is_boss {
            level * GameConfig::BOSS_XP_PER_LEVEL
        } else {
            (level * GameConfig::ENEMY_XP_PER_LEVEL).max(1)
        }
    }
}

impl Keyed for Enemy {
    type Key = EnemyId;

    fn key(&self) -> &EnemyId {
        &self.id
    }
}
