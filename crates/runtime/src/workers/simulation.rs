//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), applies
//! actions via [`game_core::GameEngine`], queues saves for the persistence
//! worker and publishes events to the EventBus.

use std::sync::Arc;

use tokio::sync::mpsc::error::SendError;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use game_core::{
    Action, GameEngine, GameState, LogLine, ReduceOutcome, Resolution, SaveSnapshot, StatsCache,
    auto_interval_ms, is_channel_active,
};

use super::persistence::{SaveJob, release};
use crate::api::{DispatchReceipt, Result, RuntimeError};
use crate::clock::Clock;
use crate::events::{Event, EventBus, GameStateEvent, LogEvent, ProgressionEvent};
use crate::oracle::OracleManager;
use crate::repository::SaveRepository;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Apply an action. `reply` is `None` for fire-and-forget producers.
    Dispatch {
        action: Action,
        reply: Option<oneshot::Sender<DispatchReceipt>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    /// Stop after the commands queued before this one.
    Shutdown,
}

/// Timer-relevant facts derived from the state after every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub auto_interval_ms: u64,
    pub channel_active: bool,
}

impl Cadence {
    pub fn of(state: &GameState) -> Self {
        Self {
            auto_interval_ms: auto_interval_ms(&state.player),
            channel_active: is_channel_active(&state.player),
        }
    }
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    state: GameState,
    oracles: OracleManager,
    stats: StatsCache,
    saves: Option<mpsc::Sender<SaveJob>>,
    clock: Arc<dyn Clock>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    cadence: watch::Sender<Cadence>,
}

impl SimulationWorker {
    pub(crate) fn new(
        state: GameState,
        oracles: OracleManager,
        clock: Arc<dyn Clock>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let (cadence, _) = watch::channel(Cadence::of(&state));
        Self {
            state,
            oracles,
            stats: StatsCache::default(),
            saves: None,
            clock,
            command_rx,
            event_bus,
            cadence,
        }
    }

    /// Queue a save on `saves` after every persisted action kind.
    pub(crate) fn with_saves(mut self, saves: mpsc::Sender<SaveJob>) -> Self {
        self.saves = Some(saves);
        self
    }

    /// Receiver for the timer cadence, updated after every action.
    pub(crate) fn cadence(&self) -> watch::Receiver<Cadence> {
        self.cadence.subscribe()
    }

    /// Loads the stored save, if any, through the LOAD action.
    pub(crate) async fn bootstrap(&mut self, repository: Arc<dyn SaveRepository>) -> Result<()> {
        let loaded = tokio::task::spawn_blocking(move || repository.load_save())
            .await
            .map_err(RuntimeError::WorkerJoin)??;
        match loaded {
            Some(snapshot) => {
                info!(target: "runtime::worker", "restoring saved session");
                self.apply(Action::load(snapshot), None).await;
            }
            None => debug!(target: "runtime::worker", "no save found, starting fresh"),
        }
        Ok(())
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                Command::Dispatch { action, reply } => self.apply(action, reply).await,
                Command::QueryState { reply } => {
                    if reply.send(self.state.clone()).is_err() {
                        debug!("QueryState reply channel closed (caller dropped)");
                    }
                }
                Command::Shutdown => break,
            }
        }
        debug!(target: "runtime::worker", "simulation worker stopped");
    }

    /// Applies one action and performs every side effect that follows it.
    ///
    /// This is the only place that calls [`GameEngine::reduce`]. When the
    /// action is saved, `reply` travels with the save and is answered once the
    /// write is done.
    pub(crate) async fn apply(
        &mut self,
        action: Action,
        reply: Option<oneshot::Sender<DispatchReceipt>>,
    ) {
        let now = self.clock.now();
        let outcome = {
            let env = self.oracles.as_game_env();
            let mut engine = GameEngine::new(env, &mut self.stats);
            engine.reduce(&self.state, &action, now)
        };

        let ReduceOutcome {
            state,
            kind,
            stats_recomputed,
            new_log_entries,
            rejection,
            resolution,
        } = outcome;
        self.state = state;

        debug!(
            target: "runtime::worker",
            action = %kind,
            stats_recomputed,
            new_lines = new_log_entries.len(),
            "applied"
        );
        if let Some(rejection) = &rejection {
            warn!(
                target: "runtime::worker",
                action = %kind,
                code = rejection.code,
                severity = rejection.severity.as_str(),
                "{}",
                rejection.message
            );
        }

        self.event_bus
            .publish(Event::GameState(GameStateEvent::ActionApplied {
                kind,
                at: now,
                stats_recomputed,
                rejection: rejection
                    .as_ref()
                    .map(|r| (r.code.to_owned(), r.message.clone())),
            }));
        for line in &new_log_entries {
            self.event_bus.publish(Event::Log(LogEvent {
                at: now,
                line: LogLine::classify(line),
            }));
        }
        if let Some(resolution) = &resolution {
            self.publish_progression(resolution);
        }

        let next = Cadence::of(&self.state);
        self.cadence.send_if_modified(|cadence| {
            let changed = *cadence != next;
            *cadence = next;
            changed
        });

        let receipt = DispatchReceipt {
            kind,
            stats_recomputed,
            new_log_entries,
            rejection,
            resolution,
            persisted: false,
        };
        let saves = self.saves.as_ref().filter(|_| kind.persists());
        let Some(saves) = saves else {
            if let Some(reply) = reply {
                release(reply, receipt);
            }
            return;
        };

        let job = SaveJob {
            snapshot: SaveSnapshot::capture(&self.state),
            at: now,
            receipt: reply.map(|reply| (receipt, reply)),
        };
        if let Err(SendError(job)) = saves.send(job).await {
            warn!(target: "runtime::worker", action = %kind, "persistence worker stopped, save dropped");
            if let Some((receipt, reply)) = job.receipt {
                release(reply, receipt);
            }
        }
    }

    fn publish_progression(&self, resolution: &Resolution) {
        if !resolution.defeated.is_empty() {
            let bosses = resolution.defeated.iter().filter(|d| d.is_boss).count();
            for boss in resolution.defeated.iter().filter(|d| d.is_boss) {
                info!(target: "runtime::worker", boss = %boss.name, level = boss.level, xp = boss.xp, "boss defeated");
            }
            self.event_bus
                .publish(Event::Progression(ProgressionEvent::EnemiesDefeated {
                    count: resolution.defeated.len(),
                    bosses,
                    xp: resolution.xp_gained,
                }));
        }
        if resolution.levels_gained > 0 {
            let level = self.state.player.level;
            info!(target: "runtime::worker", level, gained = resolution.levels_gained, "level up");
            self.event_bus
                .publish(Event::Progression(ProgressionEvent::LevelUp {
                    level,
                    levels_gained: resolution.levels_gained,
                }));
        }
        if resolution.loot.converted > 0 {
            self.event_bus
                .publish(Event::Progression(ProgressionEvent::LootConverted {
                    items: resolution.loot.converted,
                    gold: resolution.loot.converted_gold,
                }));
        }
    }
}
