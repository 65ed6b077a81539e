//! Memoized derived-stats recomputation.
//!
//! The key is a SHA-256 digest over the canonical JSON of every input the
//! fold reads. A miss is always safe: it recomputes.
use std::collections::VecDeque;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::GameConfig;
use crate::state::{
    Attributes, Equipment, Player, PassiveTreeState, SkillGem, SkillId, StatBlock, Stone,
    SupportGem, Timestamp,
};
use crate::stats::{DerivedStats, compute_derived_stats};

/// Source of derived stats for the reducer's recompute gate.
pub trait StatsMemo {
    fn derive(&mut self, player: &Player, now: Timestamp) -> DerivedStats;
}

/// Recomputes on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uncached;

impl StatsMemo for Uncached {
    fn derive(&mut self, player: &Player, _now: Timestamp) -> DerivedStats {
        compute_derived_stats(player)
    }
}

/// Hex digest identifying one set of stat inputs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StatsKey(String);

impl StatsKey {
    /// `None` if the inputs cannot be encoded, in which case callers skip the cache.
    pub fn for_player(player: &Player) -> Option<Self> {
        let view = StatsInputs::of(player);
        let canonical = serde_json::to_vec(&view).ok()?;
        Some(Self(hex::encode(Sha256::digest(&canonical))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Serialize)]
struct StatsInputs<'a> {
    level: u32,
    attributes: &'a Attributes,
    base: [f64; 3],
    equipment: &'a Equipment,
    bar: &'a [Option<SkillId>],
    skills: Vec<&'a SkillGem>,
    supports: Vec<&'a SupportGem>,
    passive_state: &'a PassiveTreeState,
    passive_stats: StatBlock,
    stones: &'a [Stone],
}

impl<'a> StatsInputs<'a> {
    fn of(player: &'a Player) -> Self {
        let skills: Vec<&SkillGem> = player.bar_skills().map(|(_, gem)| gem).collect();
        let mut supports: Vec<&SupportGem> = skills
            .iter()
            .flat_map(|gem| player.supports_of(gem))
            .collect();
        supports.sort_by(|a, b| a.id.cmp(&b.id));
        supports.dedup_by(|a, b| a.id == b.id);

        Self {
            level: player.level,
            attributes: &player.attributes,
            base: [
                player.base_max_hp,
                player.base_max_mana,
                player.base_mana_regen,
            ],
            equipment: &player.equipment,
            bar: player.skill_bar.slots(),
            skills,
            supports,
            passive_state: &player.passive_tree_state,
            passive_stats: player
                .passive_tree_state
                .total_stats(&player.passive_tree_data),
            stones: &player.stones,
        }
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    key: StatsKey,
    stored_at: Timestamp,
    stats: DerivedStats,
}

/// Bounded, time-limited memo of derived stats.
///
/// Holds at most `capacity` entries, evicting the oldest; entries older than
/// `ttl_ms` are never served.
#[derive(Clone, Debug)]
pub struct StatsCache {
    entries: VecDeque<CacheEntry>,
    capacity: usize,
    ttl_ms: u64,
    hits: u64,
    misses: u64,
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new(GameConfig::STATS_CACHE_CAPACITY, GameConfig::STATS_CACHE_TTL_MS)
    }
}

impl StatsCache {
    pub fn new(capacity: usize, ttl_ms: u64) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            ttl_ms,
            hits: 0,
            misses: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn evict_expired(&mut self, now: Timestamp) {
        let ttl = self.ttl_ms;
        self.entries
            .retain(|entry| now.since(entry.stored_at) < ttl);
    }
}

impl StatsMemo for StatsCache {
    fn derive(&mut self, player: &Player, now: Timestamp) -> DerivedStats {
        let Some(key) = StatsKey::for_player(player) else {
            self.misses += 1;
            return compute_derived_stats(player);
        };

        self.evict_expired(now);
        if let Some(entry) = self.entries.iter().find(|entry| entry.key == key) {
            self.hits += 1;
            return entry.stats.clone();
        }

        self.misses += 1;
        let stats = compute_derived_stats(player);
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(CacheEntry {
            key,
            stored_at: now,
            stats: stats.clone(),
        });
        stats
    }
}
