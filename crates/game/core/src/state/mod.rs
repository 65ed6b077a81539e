//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the player, the enemy
//! field, inventory and combat log. Runtime layers clone or query this state
//! but mutate it exclusively through the engine.
pub mod snapshot;
pub mod types;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use snapshot::{SaveSnapshot, SkillsSnapshot};
pub use types::{
    AnimationCommand, Attributes, CharacterModel, Enemy, EnemyId, EnemyState, Equipment,
    EquipmentSlot, GameLog, Item, ItemId, Keyed, LogLine, ModifierKind, NodeId,
    ParseAnimationError, PassiveNode, PassiveTreeData, PassiveTreeState, Player, Position, Rarity,
    Registry, Requirements, SkillBar, SkillGem, SkillId, SkillScaling, SkillTags, StatBlock, Stone,
    StoneId, SupportGem, SupportId, SupportLinks, SupportModifier, Timestamp,
};

use crate::config::GameConfig;
use crate::env::CatalogOracle;

/// Canonical snapshot of one game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub player: Player,
    /// Alive and dying enemies, at most [`GameConfig::MAX_ENEMIES`].
    pub enemies: Registry<Enemy>,
    /// Unequipped items, at most [`GameConfig::INVENTORY_CAPACITY`].
    pub inventory: Vec<Item>,
    pub log: GameLog,
    pub auto_combat: bool,
    /// Supplied by the renderer; `None` until the first position update.
    pub player_position: Option<Position>,
    /// Supplied by the renderer; takes precedence over `Enemy::position`.
    pub enemy_positions: BTreeMap<EnemyId, Position>,
    pub last_stats_update: Option<Timestamp>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            player: Player::default(),
            enemies: Registry::new(),
            inventory: Vec::new(),
            log: GameLog::default(),
            auto_combat: true,
            player_position: None,
            enemy_positions: BTreeMap::new(),
            last_stats_update: None,
        }
    }
}

impl GameState {
    /// New session with a fresh player built from the catalog.
    pub fn new_game(catalog: &dyn CatalogOracle) -> Self {
        Self {
            player: Player::new(
                catalog.skill_gems(),
                catalog.support_gems(),
                catalog.passive_tree(),
            ),
            ..Self::default()
        }
    }

    /// Best known position of `enemy`: renderer-supplied first, then the spawn position.
    pub fn enemy_position(&self, enemy: &Enemy) -> Option<Position> {
        self.enemy_positions
            .get(&enemy.id)
            .copied()
            .or(enemy.position)
    }

    /// Distance from the player to `enemy`, if both positions are known.
    pub fn distance_to(&self, enemy: &Enemy) -> Option<f64> {
        let player = self.player_position?;
        self.enemy_position(enemy).map(|pos| player.distance(&pos))
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|enemy| enemy.is_alive())
    }

    pub fn inventory_is_full(&self) -> bool {
        self.inventory.len() >= GameConfig::INVENTORY_CAPACITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::enemy;

    #[test]
    fn renderer_positions_take_precedence() {
        let mut state = GameState::default();
        state.player_position = Some(Position::ORIGIN);
        let goblin = enemy(1, 30.0).at(Position::new(100.0, 0.0));
        state.enemies.insert(goblin.clone());
        assert_eq!(state.distance_to(&goblin), Some(100.0));

        state
            .enemy_positions
            .insert(goblin.id, Position::new(0.0, 40.0));
        assert_eq!(state.distance_to(&goblin), Some(40.0));
    }

    #[test]
    fn distance_unknown_without_player_position() {
        let mut state = GameState::default();
        let goblin = enemy(1, 30.0).at(Position::new(3.0, 4.0));
        state.enemies.insert(goblin.clone());
        assert_eq!(state.distance_to(&goblin), None);
    }
}
