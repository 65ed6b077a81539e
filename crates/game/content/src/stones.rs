//! Stone schema migration rules.
//!
//! Version 1 stones used their display name as id, so two copies of the same
//! stone collided. Migration assigns every stone a unique, stable id.
use std::collections::BTreeSet;

use game_core::{Stone, StoneId};

/// Schema version written by the current build.
pub const CURRENT_STONE_VERSION: u32 = 2;

/// Upgrades outdated stones and resolves id collisions.
///
/// Up-to-date stones with unique ids are returned unchanged.
pub fn migrate_stones(mut stones: Vec<Stone>) -> Vec<Stone> {
    let mut seen = BTreeSet::new();
    for stone in &mut stones {
        let stale = stone.version < CURRENT_STONE_VERSION;
        if stale || stone.id.as_str().is_empty() || seen.contains(&stone.id) {
            stone.id = unique_id(&stone.name, &seen);
        }
        stone.version = stone.version.max(CURRENT_STONE_VERSION);
        seen.insert(stone.id.clone());
    }
    stones
}

/// Reassigns every stone id regardless of version.
pub fn force_migrate_stones(stones: &mut [Stone]) {
    let mut seen = BTreeSet::new();
    for stone in stones.iter_mut() {
        stone.id = unique_id(&stone.name, &seen);
        stone.version = CURRENT_STONE_VERSION;
        seen.insert(stone.id.clone());
    }
}

fn unique_id(name: &str, taken: &BTreeSet<StoneId>) -> StoneId {
    let slug: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let slug = if slug.is_empty() { "stone".to_owned() } else { slug };
    (1..)
        .map(|n| StoneId::new(format!("{slug}_{n}")))
        .find(|id| !taken.contains(id))
        .unwrap_or_else(|| StoneId::new(slug))
}
