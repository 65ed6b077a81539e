//! State transition engine.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]: every
//! dispatched [`Action`] flows through [`GameEngine::reduce`], which returns a
//! new state and leaves the previous one untouched. Expected failures never
//! escape as errors; they are logged into the state and surfaced as a
//! [`Rejection`] on the outcome.

mod cache;
mod dispatch;
mod inventory;
mod load;

pub use cache::{StatsCache, StatsKey, StatsMemo, Uncached};
pub use inventory::EquipError;
pub use load::repair;

use crate::action::{Action, ActionKind};
use crate::combat::Resolution;
use crate::env::GameEnv;
use crate::error::Rejection;
use crate::state::{GameState, Timestamp};

/// Complete outcome of one reduction.
#[derive(Clone, Debug, PartialEq)]
pub struct ReduceOutcome {
    pub state: GameState,
    pub kind: ActionKind,
    /// True when the action passed the stats gate and `player.stats` was refreshed.
    pub stats_recomputed: bool,
    /// Log lines produced by this action, oldest first.
    pub new_log_entries: Vec<String>,
    pub rejection: Option<Rejection>,
    /// Defeats, loot and level-ups caused by this action.
    pub resolution: Option<Resolution>,
}

impl ReduceOutcome {
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }
}

/// Reducer bound to its collaborators and the derived-stats memo.
pub struct GameEngine<'a> {
    env: GameEnv<'a>,
    stats: &'a mut dyn StatsMemo,
}

impl<'a> GameEngine<'a> {
    pub fn new(env: GameEnv<'a>, stats: &'a mut dyn StatsMemo) -> Self {
        Self { env, stats }
    }

    pub fn env(&self) -> &GameEnv<'a> {
        &self.env
    }

    /// Applies `action` to a copy of `state`.
    ///
    /// Derived stats are recomputed only for kinds where
    /// [`ActionKind::recomputes_stats`] holds.
    pub fn reduce(&mut self, state: &GameState, action: &Action, now: Timestamp) -> ReduceOutcome {
        let kind = action.kind();
        let mut next = state.clone();
        let pushed_before = next.log.pushed();

        let applied = dispatch::apply(&mut next, action, &self.env, now);

        let stats_recomputed = kind.recomputes_stats();
        if stats_recomputed {
            let stats = self.stats.derive(&next.player, now);
            next.player.apply_stats(stats);
            next.last_stats_update = Some(now);
        }

        let pushed = next.log.pushed().saturating_sub(pushed_before);
        let fresh = usize::try_from(pushed).unwrap_or(usize::MAX).min(next.log.len());
        let new_log_entries = next.log.newest(fresh);

        ReduceOutcome {
            state: next,
            kind,
            stats_recomputed,
            new_log_entries,
            rejection: applied.rejection,
            resolution: applied.resolution,
        }
    }
}
