//! Stand-in for the player: spends skill points and swings at enemies.
//!
//! The runtime only automates skills; unlocking them and basic attacks come
//! from the player. Without a renderer this module makes those choices.
use game_core::combat::nearest_target;
use game_core::{Action, GameConfig, GameState};

/// Damage of a basic attack before equipment.
const BASE_HIT: f64 = 8.0;

/// Actions a simple player would take in `state`.
pub fn plan(state: &GameState) -> Vec<Action> {
    let player = &state.player;
    let mut actions = Vec::new();

    if let Some(target) = nearest_target(state) {
        actions.push(Action::Tick {
            enemy_id: target.id,
            damage: BASE_HIT + player.stats.flat_damage,
        });
    }

    let mut points = player.skill_points;
    let mut free_slots =
        (0..GameConfig::SKILL_BAR_SLOTS).filter(|slot| player.skill_bar.get(*slot).is_none());
    for gem in player.skill_gems.iter() {
        let wants_slot = if gem.is_unlocked {
            !gem.is_equipped
        } else if player.level >= gem.unlock_level && points >= gem.unlock_cost {
            points -= gem.unlock_cost;
            actions.push(Action::UnlockSkillGem(gem.id.clone()));
            true
        } else {
            false
        };
        // the channel skill runs from its own timer
        if !wants_slot || gem.is_channel() {
            continue;
        }
        if let Some(slot) = free_slots.next() {
            actions.push(Action::EquipSkillToBar {
                skill_id: gem.id.clone(),
                slot,
            });
        }
    }

    actions
}
