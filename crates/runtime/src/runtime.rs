//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker and the timers, wires up the
//! command and event channels, and exposes a builder-based API for clients.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use game_core::{GameConfig, GameState};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::clock::{Clock, SystemClock};
use crate::events::{Event, EventBus, Topic};
use crate::oracle::OracleManager;
use crate::repository::SaveRepository;
use crate::spawner::{EnemySpawner, RandomSpawner};
use crate::workers::{Command, PersistenceWorker, SimulationWorker, TimerSet};

/// Periods of the four producers, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    pub spawn_ms: u64,
    /// Bounds for the auto-skill cadence computed from the player.
    pub auto_min_ms: u64,
    pub auto_max_ms: u64,
    pub channel_ms: u64,
    pub mana_regen_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            spawn_ms: 1500,
            auto_min_ms: GameConfig::AUTO_INTERVAL_MIN_MS,
            auto_max_ms: GameConfig::AUTO_INTERVAL_BASE_MS,
            channel_ms: 100,
            mana_regen_ms: 100,
        }
    }
}

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    pub timers: TimerConfig,
    /// Start the four producers (disable to drive the game by hand)
    pub enable_timers: bool,
    /// Save after every persisted action kind
    pub persist_on_mutation: bool,
    /// Load the repository's save once before accepting commands
    pub load_on_start: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 64,
            timers: TimerConfig::default(),
            enable_timers: true,
            persist_on_mutation: true,
            load_on_start: true,
        }
    }
}

/// Main runtime that orchestrates the game session
///
/// Runtime owns the workers and the timers. [`RuntimeHandle`] provides a
/// cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker: JoinHandle<()>,
    persistence: Option<JoinHandle<()>>,
    timers: TimerSet,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to one event topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Stop the timers, drain queued commands and saves, and wait for the
    /// workers.
    pub async fn shutdown(self) -> Result<()> {
        self.timers.abort();

        if !self.handle.is_closed() && self.handle.send(Command::Shutdown).await.is_err() {
            tracing::debug!(target: "runtime", "worker exited before shutdown");
        }
        drop(self.handle);

        self.worker.await.map_err(RuntimeError::WorkerJoin)?;
        // the simulation worker held the only save sender
        if let Some(persistence) = self.persistence {
            persistence.await.map_err(RuntimeError::WorkerJoin)?;
        }
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn SaveRepository>>,
    clock: Option<Arc<dyn Clock>>,
    spawner: Option<Box<dyn EnemySpawner>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            oracles: None,
            repository: None,
            clock: None,
            spawner: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial game state (default: a new game from the catalog)
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the save repository (optional; without one nothing is persisted)
    pub fn repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Override the time source (default: [`SystemClock`])
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Override the enemy spawner (default: [`RandomSpawner::from_entropy`])
    pub fn spawner(mut self, spawner: impl EnemySpawner + 'static) -> Self {
        self.spawner = Some(Box::new(spawner));
        self
    }

    /// Loads the save, starts the worker and, if enabled, the timers.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn build(self) -> Result<Runtime> {
        let RuntimeBuilder {
            config,
            state,
            oracles,
            repository,
            clock,
            spawner,
        } = self;

        let oracles = oracles.ok_or(RuntimeError::MissingOracles)?;
        let state = state.unwrap_or_else(|| GameState::new_game(oracles.catalog()));
        let clock = clock.unwrap_or_else(|| Arc::new(SystemClock));

        let (command_tx, command_rx) = mpsc::channel(config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(config.event_buffer_size);

        let mut worker =
            SimulationWorker::new(state, oracles, clock, command_rx, event_bus.clone());
        let mut persistence = None;
        if let Some(repository) = repository {
            if config.persist_on_mutation {
                let (save_tx, save_rx) = mpsc::channel(config.command_buffer_size.max(1));
                let saver = PersistenceWorker::new(repository.clone(), save_rx, event_bus.clone());
                persistence = Some(tokio::spawn(saver.run()));
                worker = worker.with_saves(save_tx);
            }
            if config.load_on_start {
                worker.bootstrap(repository).await?;
            }
        }

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());
        let cadence = worker.cadence();
        let worker = tokio::spawn(worker.run());

        let timers = if config.enable_timers {
            let spawner = spawner.unwrap_or_else(|| Box::new(RandomSpawner::from_entropy()));
            TimerSet::start(&handle, cadence, spawner, &config.timers, &event_bus)
        } else {
            TimerSet::default()
        };

        tracing::info!(
            target: "runtime",
            timers = config.enable_timers,
            persist = config.persist_on_mutation,
            "runtime started"
        );

        Ok(Runtime {
            handle,
            worker,
            persistence,
            timers,
        })
    }
}
