//! Traits describing the engine's external collaborators.
//!
//! Oracles supply gem templates, loot rolls, passive-tree allocation, stone
//! migration and save migration. The [`GameEnv`] aggregate bundles them so the
//! engine can reach everything it needs without coupling to concrete
//! implementations.
mod catalog;
mod error;
mod loot;
mod migrate;
mod passive;
mod stones;

pub use catalog::CatalogOracle;
pub use error::OracleError;
pub use loot::LootOracle;
pub use migrate::{IdentityMigrator, SnapshotMigrator};
pub use passive::{AllocationError, PassiveTreeOracle};
pub use stones::StoneOracle;

/// Aggregates the oracles required by the reducer.
///
/// Every oracle is optional so tests can supply only what they exercise;
/// actions needing a missing oracle degrade to a logged message.
#[derive(Clone, Copy, Default)]
pub struct GameEnv<'a> {
    catalog: Option<&'a dyn CatalogOracle>,
    loot: Option<&'a dyn LootOracle>,
    passives: Option<&'a dyn PassiveTreeOracle>,
    stones: Option<&'a dyn StoneOracle>,
    migrator: Option<&'a dyn SnapshotMigrator>,
}

impl<'a> GameEnv<'a> {
    pub fn with_all(
        catalog: &'a dyn CatalogOracle,
        loot: &'a dyn LootOracle,
        passives: &'a dyn PassiveTreeOracle,
        stones: &'a dyn StoneOracle,
    ) -> Self {
        Self {
            catalog: Some(catalog),
            loot: Some(loot),
            passives: Some(passives),
            stones: Some(stones),
            migrator: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: &'a dyn CatalogOracle) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_loot(mut self, loot: &'a dyn LootOracle) -> Self {
        self.loot = Some(loot);
        self
    }

    pub fn with_passives(mut self, passives: &'a dyn PassiveTreeOracle) -> Self {
        self.passives = Some(passives);
        self
    }

    pub fn with_stones(mut self, stones: &'a dyn StoneOracle) -> Self {
        self.stones = Some(stones);
        self
    }

    pub fn with_migrator(mut self, migrator: &'a dyn SnapshotMigrator) -> Self {
        self.migrator = Some(migrator);
        self
    }

    /// Returns the CatalogOracle, or an error if not available.
    pub fn catalog(&self) -> Result<&'a dyn CatalogOracle, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the LootOracle, or an error if not available.
    pub fn loot(&self) -> Result<&'a dyn LootOracle, OracleError> {
        self.loot.ok_or(OracleError::LootNotAvailable)
    }

    /// Returns the PassiveTreeOracle, or an error if not available.
    pub fn passives(&self) -> Result<&'a dyn PassiveTreeOracle, OracleError> {
        self.passives.ok_or(OracleError::PassivesNotAvailable)
    }

    /// Returns the StoneOracle, or an error if not available.
    pub fn stones(&self) -> Result<&'a dyn StoneOracle, OracleError> {
        self.stones.ok_or(OracleError::StonesNotAvailable)
    }

    /// The configured save migrator, or the identity migrator.
    pub fn migrator(&self) -> &'a dyn SnapshotMigrator {
        self.migrator.unwrap_or(&IdentityMigrator)
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("catalog", &self.catalog.is_some())
            .field("loot", &self.loot.is_some())
            .field("passives", &self.passives.is_some())
            .field("stones", &self.stones.is_some())
            .field("migrator", &self.migrator.is_some())
            .finish()
    }
}
