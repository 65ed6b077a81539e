//! [`game_core::CatalogOracle`] backed by a loaded content catalog.
use game_content::ContentCatalog;
use game_core::{CatalogOracle, PassiveTreeData, SkillGem, SupportGem};

pub struct CatalogOracleImpl {
    catalog: ContentCatalog,
}

impl CatalogOracleImpl {
    pub fn new(catalog: ContentCatalog) -> Self {
        Self { catalog }
    }

    pub fn content(&self) -> &ContentCatalog {
        &self.catalog
    }
}

impl Default for CatalogOracleImpl {
    fn default() -> Self {
        Self::new(ContentCatalog::builtin())
    }
}

impl CatalogOracle for CatalogOracleImpl {
    fn skill_gems(&self) -> Vec<SkillGem> {
        self.catalog.skills.clone()
    }

    fn support_gems(&self) -> Vec<SupportGem> {
        self.catalog.supports.clone()
    }

    fn passive_tree(&self) -> PassiveTreeData {
        self.catalog.passive_tree.clone()
    }
}
