//! File-based save repository.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use game_core::SaveSnapshot;
use serde::{Deserialize, Serialize};

use crate::repository::{RepositoryError, Result, SaveRepository};

/// On-disk wrapper around a snapshot.
///
/// Writes serialize a `SaveEnvelope<&SaveSnapshot>` so the snapshot is not
/// copied; reads produce the owned form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEnvelope<S = SaveSnapshot> {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub snapshot: S,
}

impl<S> SaveEnvelope<S> {
    pub const VERSION: u32 = 1;

    pub fn new(snapshot: S) -> Self {
        Self {
            version: Self::VERSION,
            saved_at: Utc::now(),
            snapshot,
        }
    }
}

/// Stores one session as `<base_dir>/<session>.json`.
///
/// Writes go to a temporary file first and are moved into place with an
/// atomic rename, so a crash never leaves a half-written save behind.
pub struct FileSaveRepository {
    base_dir: PathBuf,
    session: String,
}

impl FileSaveRepository {
    /// Creates the repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>, session: impl Into<String>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            session: session.into(),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.base_dir.join(format!("{}.json", self.session))
    }

    pub fn session(&self) -> &str {
        &self.session
    }
}

impl SaveRepository for FileSaveRepository {
    fn load_save(&self) -> Result<Option<SaveSnapshot>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let envelope: SaveEnvelope =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::CorruptedData {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        if envelope.version > <SaveEnvelope>::VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                found: envelope.version,
                supported: <SaveEnvelope>::VERSION,
            });
        }

        tracing::debug!(
            target: "runtime::repository",
            path = %path.display(),
            saved_at = %envelope.saved_at,
            "loaded save"
        );
        Ok(Some(envelope.snapshot))
    }

    fn save_state(&self, snapshot: &SaveSnapshot) -> Result<()> {
        let path = self.path();
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec(&SaveEnvelope::new(snapshot))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::trace!(target: "runtime::repository", path = %path.display(), "saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(target: "runtime::repository", path = %path.display(), "deleted save");
        }
        Ok(())
    }
}
