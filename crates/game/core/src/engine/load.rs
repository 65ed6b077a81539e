//! Snapshot loading and repair.
//!
//! Partial or stale saves are never rejected. Whatever the snapshot carries
//! replaces the matching part of the state, then [`repair`] restores every
//! invariant the rest of the engine relies on.
use crate::config::GameConfig;
use crate::env::{CatalogOracle, GameEnv};
use crate::state::{GameState, Player, SaveSnapshot, SkillBar};

pub fn load_snapshot(state: &mut GameState, snapshot: SaveSnapshot, env: &GameEnv<'_>) {
    let snapshot = env.migrator().migrate(snapshot);

    if let Some(player) = snapshot.player {
        state.player = player;
    }
    if let Some(skills) = snapshot.skills {
        if let Some(gems) = skills.skill_gems {
            state.player.skill_gems = gems.into_iter().collect();
        }
        if let Some(supports) = skills.support_gems {
            state.player.support_gems = supports.into_iter().collect();
        }
        if let Some(bar) = skills.skill_bar {
            state.player.skill_bar = SkillBar::from(bar);
        }
    }
    if let Some(inventory) = snapshot.inventory {
        state.inventory = inventory;
    }
    if let Some(enemies) = snapshot.enemies {
        state.enemies = enemies.into_iter().collect();
    }

    repair(state, env);
    state.log.push("Game loaded");
}

/// Restores state invariants after a load.
pub fn repair(state: &mut GameState, env: &GameEnv<'_>) {
    if let Ok(catalog) = env.catalog() {
        backfill_catalog(&mut state.player, catalog);
    }
    repair_gems(&mut state.player);
    repair_progress(&mut state.player);

    if let Ok(stones) = env.stones() {
        let owned = std::mem::take(&mut state.player.stones);
        state.player.stones = stones.migrate_player_stones(owned);
    }

    state.inventory.truncate(GameConfig::INVENTORY_CAPACITY);
    state.enemies.truncate(GameConfig::MAX_ENEMIES);
    let enemies = &state.enemies;
    state
        .enemy_positions
        .retain(|id, _| enemies.contains(id));
}

fn backfill_catalog(player: &mut Player, catalog: &dyn CatalogOracle) {
    for template in catalog.skill_gems() {
        player.skill_gems.insert_new(template);
    }
    for template in catalog.support_gems() {
        player.support_gems.insert_new(template);
    }
    if player.passive_tree_data.is_empty() {
        player.passive_tree_data = catalog.passive_tree();
    }
}

fn repair_gems(player: &mut Player) {
    let Player {
        skill_gems,
        support_gems,
        skill_bar,
        skill_cooldowns,
        ..
    } = player;

    for support in support_gems.iter_mut() {
        support.max_level = support.max_level.max(1);
        support.level = support.level.clamp(1, support.max_level);
    }
    for gem in skill_gems.iter_mut() {
        gem.max_level = gem.max_level.max(1);
        gem.level = gem.level.clamp(1, gem.max_level);
        let mut seen = Vec::with_capacity(gem.supports.len());
        gem.supports.retain(|id| {
            let keep = support_gems.contains(id) && !seen.contains(id);
            if keep {
                seen.push(id.clone());
            }
            keep
        });
    }

    skill_bar.retain_valid(|id| skill_gems.get(id).is_some_and(|gem| gem.is_unlocked));
    for gem in skill_gems.iter_mut() {
        gem.is_equipped = skill_bar.contains(&gem.id);
    }
    skill_cooldowns.retain(|id, _| skill_gems.contains(id));
}

fn repair_progress(player: &mut Player) {
    player.level = player.level.max(1);
    if player.next_level_xp == 0 {
        player.next_level_xp = GameConfig::BASE_LEVEL_XP;
    }
    let data = &player.passive_tree_data;
    if !data.is_empty() {
        player
            .passive_tree_state
            .allocated
            .retain(|node| data.node(node).is_some());
    }
}
