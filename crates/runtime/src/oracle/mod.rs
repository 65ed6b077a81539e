//! Runtime wrappers around static game content.
//!
//! These implementations expose the `game-core` oracle traits and bundle them
//! into an [`OracleManager`] so the worker can build a [`GameEnv`] for every
//! reduction. Content is immutable at runtime; the only interior state is the
//! loot random number generator.
mod catalog;
mod loot;
mod passive;
mod stones;

use std::sync::Arc;

use game_content::{ContentCatalog, LootTable};
use game_core::GameEnv;

pub use catalog::CatalogOracleImpl;
pub use loot::LootOracleImpl;
pub use passive::PassiveTreeOracleImpl;
pub use stones::StoneOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) catalog: Arc<CatalogOracleImpl>,
    pub(crate) loot: Arc<LootOracleImpl>,
    pub(crate) passives: Arc<PassiveTreeOracleImpl>,
    pub(crate) stones: Arc<StoneOracleImpl>,
}

impl OracleManager {
    pub fn new(
        catalog: Arc<CatalogOracleImpl>,
        loot: Arc<LootOracleImpl>,
        passives: Arc<PassiveTreeOracleImpl>,
        stones: Arc<StoneOracleImpl>,
    ) -> Self {
        Self {
            catalog,
            loot,
            passives,
            stones,
        }
    }

    /// Oracles over `catalog` with the default loot table.
    pub fn from_content(catalog: ContentCatalog, loot: LootOracleImpl) -> Self {
        Self::new(
            Arc::new(CatalogOracleImpl::new(catalog)),
            Arc::new(loot),
            Arc::new(PassiveTreeOracleImpl),
            Arc::new(StoneOracleImpl),
        )
    }

    /// Built-in content with entropy-seeded loot.
    pub fn builtin() -> Self {
        Self::from_content(
            ContentCatalog::builtin(),
            LootOracleImpl::from_entropy(LootTable::default()),
        )
    }

    /// Converts oracle manager into GameEnv for game-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::with_all(
            self.catalog.as_ref(),
            self.loot.as_ref(),
            self.passives.as_ref(),
            self.stones.as_ref(),
        )
    }

    pub fn catalog(&self) -> &CatalogOracleImpl {
        &self.catalog
    }
}
