use crate::error::{ErrorSeverity, GameError};
use crate::state::{SkillId, SupportId};

/// Reasons a skill management operation is rejected.
///
/// The `Display` text is the message shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkillError {
    #[error("Skill {0} not found")]
    SkillNotFound(SkillId),

    #[error("Support gem {0} not found")]
    SupportNotFound(SupportId),

    #[error("{name} is already unlocked")]
    AlreadyUnlocked { name: String },

    #[error("{name} requires level {required} (you are level {current})")]
    LevelTooLow {
        name: String,
        required: u32,
        current: u32,
    },

    #[error("Not enough skill points: need {required}, have {available}")]
    NotEnoughSkillPoints { required: u32, available: u32 },

    #[error("{name} is locked")]
    Locked { name: String },

    #[error("{name} is already at max level ({max})")]
    MaxLevel { name: String, max: u32 },

    #[error("Invalid skill bar slot {0}")]
    InvalidSlot(usize),

    #[error("Skill bar slot {0} is empty")]
    EmptySlot(usize),

    #[error("{skill} already has the maximum of {max} support gems")]
    SupportsFull { skill: String, max: usize },

    #[error("{support} is already attached to {skill}")]
    AlreadyAttached { skill: String, support: String },

    #[error("{support} cannot support {skill}: no shared tags")]
    IncompatibleTags { skill: String, support: String },

    #[error("{support} is not attached to {skill}")]
    NotAttached { skill: String, support: String },
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LevelTooLow { .. } | Self::NotEnoughSkillPoints { .. } => {
                ErrorSeverity::Recoverable
            }
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use SkillError::*;
        match self {
            SkillNotFound(_) => "SKILL_NOT_FOUND",
            SupportNotFound(_) => "SKILL_SUPPORT_NOT_FOUND",
            AlreadyUnlocked { .. } => "SKILL_ALREADY_UNLOCKED",
            LevelTooLow { .. } => "SKILL_LEVEL_TOO_LOW",
            NotEnoughSkillPoints { .. } => "SKILL_NOT_ENOUGH_POINTS",
            Locked { .. } => "SKILL_LOCKED",
            MaxLevel { .. } => "SKILL_MAX_LEVEL",
            InvalidSlot(_) => "SKILL_INVALID_SLOT",
            EmptySlot(_) => "SKILL_EMPTY_SLOT",
            SupportsFull { .. } => "SKILL_SUPPORTS_FULL",
            AlreadyAttached { .. } => "SKILL_SUPPORT_ALREADY_ATTACHED",
            IncompatibleTags { .. } => "SKILL_INCOMPATIBLE_TAGS",
            NotAttached { .. } => "SKILL_SUPPORT_NOT_ATTACHED",
        }
    }
}
