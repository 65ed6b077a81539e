//! Skill and support gem catalog loaders.
use std::path::Path;

use game_core::{SkillGem, SupportGem};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillGem>,
}

/// Support catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportCatalog {
    pub supports: Vec<SupportGem>,
}

/// Loader for skill gem templates.
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SkillGem>> {
        let content = read_file(path)?;
        let catalog: SkillCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;
        Ok(catalog.skills.into_iter().map(as_template).collect())
    }
}

/// Loader for support gem templates.
pub struct SupportLoader;

impl SupportLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SupportGem>> {
        let content = read_file(path)?;
        let catalog: SupportCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse support catalog RON: {}", e))?;
        Ok(catalog
            .supports
            .into_iter()
            .map(|mut gem| {
                gem.level = 1;
                gem.is_unlocked = false;
                gem
            })
            .collect())
    }
}

/// Templates always start locked, unequipped and at level 1.
fn as_template(mut gem: SkillGem) -> SkillGem {
    gem.level = 1;
    gem.is_unlocked = false;
    gem.is_equipped = false;
    gem.supports.clear();
    gem
}
