//! Random loot rolls.
use std::sync::{Mutex, PoisonError};

use game_content::LootTable;
use game_core::{Item, LootOracle};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// LootOracle implementation rolling a [`LootTable`] with a shared RNG.
pub struct LootOracleImpl {
    table: LootTable,
    rng: Mutex<StdRng>,
}

impl LootOracleImpl {
    /// Reproducible rolls for tests and replays.
    pub fn seeded(table: LootTable, seed: u64) -> Self {
        Self {
            table,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy(table: LootTable) -> Self {
        Self {
            table,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl LootOracle for LootOracleImpl {
    fn generate_loot(&self, level: u32, is_boss: bool) -> Vec<Item> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.table.roll(&mut *rng, level, is_boss)
    }
}
