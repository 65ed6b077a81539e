//! Content factory for building the catalog from data files.
use std::path::{Path, PathBuf};

use crate::catalog::ContentCatalog;
use crate::gems::{builtin_skill_gems, builtin_support_gems};
use crate::loaders::{LoadResult, PassiveTreeLoader, SkillLoader, SupportLoader};
use crate::passive::default_passive_tree;

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── skills.ron
/// ├── supports.ron
/// └── passive_tree.ron
/// ```
///
/// Every file is optional; a missing file falls back to the built-in
/// content. A present but malformed file is an error.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const SKILLS_FILE: &'static str = "skills.ron";
    pub const SUPPORTS_FILE: &'static str = "supports.ron";
    pub const PASSIVE_TREE_FILE: &'static str = "passive_tree.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn load_skills(&self) -> LoadResult<Vec<game_core::SkillGem>> {
        self.load_or(Self::SKILLS_FILE, SkillLoader::load, builtin_skill_gems)
    }

    pub fn load_supports(&self) -> LoadResult<Vec<game_core::SupportGem>> {
        self.load_or(Self::SUPPORTS_FILE, SupportLoader::load, builtin_support_gems)
    }

    pub fn load_passive_tree(&self) -> LoadResult<game_core::PassiveTreeData> {
        self.load_or(
            Self::PASSIVE_TREE_FILE,
            PassiveTreeLoader::load,
            default_passive_tree,
        )
    }

    /// Loads every catalog file, filling gaps with built-in content.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        Ok(ContentCatalog {
            skills: self.load_skills()?,
            supports: self.load_supports()?,
            passive_tree: self.load_passive_tree()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn load_or<T>(
        &self,
        file: &str,
        load: fn(&Path) -> LoadResult<T>,
        builtin: fn() -> T,
    ) -> LoadResult<T> {
        let path = self.data_dir.join(file);
        if path.exists() {
            load(&path)
        } else {
            Ok(builtin())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::gems::SkillCatalog;

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_files_fall_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = ContentFactory::new(dir.path()).load_catalog().unwrap();
        assert_eq!(catalog, ContentCatalog::builtin());
    }

    #[test]
    fn skill_file_overrides_builtin_and_resets_progress() {
        let dir = tempfile::tempdir().unwrap();
        let mut skills = builtin_skill_gems();
        skills.truncate(2);
        skills[0].level = 7;
        skills[0].is_unlocked = true;
        let ron = ron::to_string(&SkillCatalog {
            skills: skills.clone(),
        })
        .unwrap();
        std::fs::write(dir.path().join(ContentFactory::SKILLS_FILE), ron).unwrap();

        let loaded = ContentFactory::new(dir.path()).load_skills().unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, skills[0].id);
        assert_eq!(loaded[0].level, 1);
        assert!(!loaded[0].is_unlocked);
    }

    #[test]
    fn hand_written_tree_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(ContentFactory::PASSIVE_TREE_FILE),
            r#"(
                nodes: [
                    (id: "origin", name: "Origin", is_start: true, connections: ["brawn"]),
                    (id: "brawn", name: "Brawn", stats: (strength: 5.0), connections: ["origin"]),
                ],
            )"#,
        )
        .unwrap();

        let tree = ContentFactory::new(dir.path()).load_passive_tree().unwrap();

        assert_eq!(tree.nodes.len(), 2);
        let brawn = tree.node(&"brawn".into()).unwrap();
        assert_eq!(brawn.stats.strength, 5.0);
    }

    #[test]
    fn dangling_connection_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(ContentFactory::PASSIVE_TREE_FILE),
            r#"(nodes: [(id: "origin", name: "Origin", is_start: true, connections: ["nowhere"])])"#,
        )
        .unwrap();

        let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
        assert!(err.to_string().contains("nowhere"), "{err}");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ContentFactory::SUPPORTS_FILE), "not ron").unwrap();
        assert!(ContentFactory::new(dir.path()).load_supports().is_err());
    }
}
