//! Post-damage resolution shared by every damage source.
use crate::config::GameConfig;
use crate::env::LootOracle;
use crate::state::{EnemyId, EnemyState, GameState, Item, Timestamp};

/// An enemy that transitioned to dying during resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Defeat {
    pub id: EnemyId,
    pub name: String,
    pub level: u32,
    pub is_boss: bool,
    pub xp: u64,
}

/// Where loot went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LootAward {
    pub added: usize,
    pub converted: usize,
    /// Sum of the real values of converted items.
    pub converted_gold: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    pub defeated: Vec<Defeat>,
    pub xp_gained: u64,
    pub levels_gained: u32,
    pub loot: LootAward,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.defeated.is_empty()
    }
}

/// Marks enemies at zero hp as dying, then awards loot and experience.
///
/// Enemies already dying are left untouched.
pub fn resolve_defeats(
    state: &mut GameState,
    loot: Option<&dyn LootOracle>,
    now: Timestamp,
) -> Resolution {
    let mut resolution = Resolution::default();
    let mut drops = Vec::new();

    for enemy in state.enemies.iter_mut() {
        if enemy.state != EnemyState::Alive || enemy.hp > 0.0 {
            continue;
        }
        enemy.mark_dying(now);
        let xp = enemy.xp_reward();
        resolution.xp_gained += xp;
        resolution.defeated.push(Defeat {
            id: enemy.id,
            name: enemy.name.clone(),
            level: enemy.level,
            is_boss: enemy.is_boss,
            xp,
        });
        if let Some(loot) = loot {
            drops.extend(loot.generate_loot(enemy.level, enemy.is_boss));
        }
    }

    if resolution.is_empty() {
        return resolution;
    }

    for defeat in &resolution.defeated {
        if defeat.is_boss {
            state
                .log
                .push(format!("Boss {} defeated! +{} XP", defeat.name, defeat.xp));
        } else {
            state
                .log
                .push(format!("{} defeated! +{} XP", defeat.name, defeat.xp));
        }
    }

    resolution.loot = award_loot(state, drops);

    resolution.levels_gained = state.player.gain_experience(resolution.xp_gained);
    if resolution.levels_gained > 0 {
        state
            .log
            .push(format!("Level up! You are now level {}", state.player.level));
    }

    resolution
}

/// Adds items until the inventory is full; the rest convert to gold at their value.
pub fn award_loot(state: &mut GameState, items: Vec<Item>) -> LootAward {
    let mut award = LootAward::default();
    if items.is_empty() {
        return award;
    }
    let total_count = items.len() as u64;
    let total_value: u64 = items.iter().map(|item| item.value).sum();

    for item in items {
        if state.inventory.len() < GameConfig::INVENTORY_CAPACITY {
            state.inventory.push(item);
            award.added += 1;
        } else {
            award.converted += 1;
            award.converted_gold += item.value;
        }
    }
    state.player.gold = state.player.gold.saturating_add(award.converted_gold);

    if award.added > 0 {
        state.log.push(format!("Found {} item(s)", award.added));
    }
    if award.converted > 0 {
        // Average over the whole drop; display only.
        let average = total_value / total_count;
        state.log.push(format!(
            "Inventory full! {} item(s) converted to gold (~{} gold each)",
            award.converted, average
        ));
    }
    award
}

/// Removes enemies that have been dying for at least the death grace.
///
/// Returns the number of purged enemies.
pub fn purge_expired(state: &mut GameState, now: Timestamp) -> usize {
    let expired: Vec<EnemyId> = state
        .enemies
        .iter()
        .filter(|enemy| enemy.is_expired(now))
        .map(|enemy| enemy.id)
        .collect();
    if expired.is_empty() {
        return 0;
    }
    state.enemies.retain(|enemy| !expired.contains(&enemy.id));
    for id in &expired {
        state.enemy_positions.remove(id);
    }
    expired.len()
}
