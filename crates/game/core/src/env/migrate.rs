use crate::state::SaveSnapshot;

/// Upgrades a persisted snapshot before the engine repairs and loads it.
pub trait SnapshotMigrator: Send + Sync {
    fn migrate(&self, snapshot: SaveSnapshot) -> SaveSnapshot {
        snapshot
    }
}

/// Leaves snapshots untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityMigrator;

impl SnapshotMigrator for IdentityMigrator {}
