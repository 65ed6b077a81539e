//! Stone migration oracle.
use game_content::{force_migrate_stones, migrate_stones};
use game_core::{Stone, StoneOracle};

/// Applies the content crate's stone migration rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct StoneOracleImpl;

impl StoneOracle for StoneOracleImpl {
    fn migrate_player_stones(&self, stones: Vec<Stone>) -> Vec<Stone> {
        migrate_stones(stones)
    }

    fn force_migrate_all_stones(&self, stones: &mut Vec<Stone>) {
        force_migrate_stones(stones);
    }
}
