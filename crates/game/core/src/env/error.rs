//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when an oracle required by an action is missing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("CatalogOracle not available")]
    CatalogNotAvailable,

    #[error("LootOracle not available")]
    LootNotAvailable,

    #[error("PassiveTreeOracle not available")]
    PassivesNotAvailable,

    #[error("StoneOracle not available")]
    StonesNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            CatalogNotAvailable => "ORACLE_CATALOG_NOT_AVAILABLE",
            LootNotAvailable => "ORACLE_LOOT_NOT_AVAILABLE",
            PassivesNotAvailable => "ORACLE_PASSIVES_NOT_AVAILABLE",
            StonesNotAvailable => "ORACLE_STONES_NOT_AVAILABLE",
        }
    }
}
