//! Repository contract for saving and loading the session snapshot.

use game_core::SaveSnapshot;

use super::Result;

/// Persistence boundary of a game session.
///
/// `load_save` runs once when the runtime starts; `save_state` after every
/// persisted action. Both are called on tokio's blocking pool, never more
/// than one at a time.
pub trait SaveRepository: Send + Sync {
    /// Latest snapshot, or `None` when the session has never been saved.
    fn load_save(&self) -> Result<Option<SaveSnapshot>>;

    /// Replaces the stored snapshot.
    fn save_state(&self, snapshot: &SaveSnapshot) -> Result<()>;

    /// Forgets the stored snapshot.
    fn clear(&self) -> Result<()>;
}
