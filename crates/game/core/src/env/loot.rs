use crate::state::Item;

/// Rolls loot for a defeated enemy.
pub trait LootOracle: Send + Sync {
    fn generate_loot(&self, level: u32, is_boss: bool) -> Vec<Item>;
}
