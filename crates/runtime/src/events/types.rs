//! Event payloads published by the runtime.

use serde::{Deserialize, Serialize};

use game_core::{ActionKind, LogLine, Timestamp};

/// Outcome of applying one action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameStateEvent {
    ActionApplied {
        kind: ActionKind,
        at: Timestamp,
        stats_recomputed: bool,
        /// Rejection code and message when the action was refused.
        rejection: Option<(String, String)>,
    },
    Persisted {
        at: Timestamp,
    },
    PersistFailed {
        error: String,
    },
}

/// One new log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub at: Timestamp,
    pub line: LogLine,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProgressionEvent {
    LevelUp {
        level: u32,
        levels_gained: u32,
    },
    EnemiesDefeated {
        count: usize,
        bosses: usize,
        xp: u64,
    },
    /// Loot that did not fit in the inventory.
    LootConverted {
        items: usize,
        gold: u64,
    },
}

/// The four periodic producers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TimerKind {
    Spawn,
    AutoSkills,
    Channel,
    ManaRegen,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TimerEvent {
    Started { timer: TimerKind, interval_ms: u64 },
    Stopped { timer: TimerKind },
}
