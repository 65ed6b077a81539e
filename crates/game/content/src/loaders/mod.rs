//! Content loaders for reading game data from files.
//!
//! Each loader reads one RON file into `game-core` types. The
//! [`ContentFactory`] combines them with the built-in content.
pub mod factory;
pub mod gems;
pub mod tree;

pub use factory::ContentFactory;
pub use gems::{SkillLoader, SupportLoader};
pub use tree::PassiveTreeLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
