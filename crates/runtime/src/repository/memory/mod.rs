//! In-memory repository for tests and throwaway sessions.

use std::sync::RwLock;

use game_core::SaveSnapshot;

use crate::repository::{RepositoryError, Result, SaveRepository};

/// Keeps the latest snapshot in memory and counts writes.
#[derive(Default)]
pub struct InMemorySaveRepository {
    inner: RwLock<Slot>,
}

#[derive(Default)]
struct Slot {
    snapshot: Option<SaveSnapshot>,
    saves: usize,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository that already holds `snapshot`, as if saved by an earlier run.
    pub fn with_snapshot(snapshot: SaveSnapshot) -> Self {
        Self {
            inner: RwLock::new(Slot {
                snapshot: Some(snapshot),
                saves: 0,
            }),
        }
    }

    /// Number of `save_state` calls so far.
    pub fn save_count(&self) -> usize {
        self.inner.read().map(|slot| slot.saves).unwrap_or(0)
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn load_save(&self) -> Result<Option<SaveSnapshot>> {
        let slot = self
            .inner
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.snapshot.clone())
    }

    fn save_state(&self, snapshot: &SaveSnapshot) -> Result<()> {
        let mut slot = self
            .inner
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slot.snapshot = Some(snapshot.clone());
        slot.saves += 1;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .inner
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slot.snapshot = None;
        Ok(())
    }
}
