//! Repository layer for dynamic runtime data.
//!
//! Repositories persist what CHANGES during play: the save snapshot of the
//! current session. Static content (gems, passive tree, loot tables) is served
//! by the oracles instead.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileSaveRepository, SaveEnvelope};
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
