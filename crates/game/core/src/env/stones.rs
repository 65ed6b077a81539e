use crate::state::Stone;

/// Stone schema and id migration.
pub trait StoneOracle: Send + Sync {
    /// Upgrades stones that need it and guarantees unique ids.
    fn migrate_player_stones(&self, stones: Vec<Stone>) -> Vec<Stone>;

    /// Re-migrates every stone in place, regardless of version.
    fn force_migrate_all_stones(&self, stones: &mut Vec<Stone>);
}
