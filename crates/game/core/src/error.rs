//! Common error infrastructure for game-core.
//!
//! Domain errors (`SkillError`, `EquipError`, `OracleError`, `AllocationError`)
//! live next to the operations they validate. None of them escape the reducer:
//! it turns them into log lines and reports a [`Rejection`] to the caller.

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Player can succeed later (e.g. after earning skill points).
    Recoverable,

    /// Invalid input that will keep failing unchanged.
    Validation,

    /// Missing collaborator or inconsistent state.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier of the error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// A rejected action as reported by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub code: &'static str,
    pub severity: ErrorSeverity,
    pub message: String,
}

impl Rejection {
    pub fn from_error<E: GameError>(error: &E) -> Self {
        Self {
            code: error.error_code(),
            severity: error.severity(),
            message: error.to_string(),
        }
    }
}
