//! Runtime orchestration for the idle ARPG simulation.
//!
//! This crate is the imperative shell around `game-core`: it owns the single
//! authoritative [`game_core::GameState`], feeds it actions from the timers
//! and from clients, persists it, and broadcasts what happened. Consumers
//! embed [`Runtime`] and interact with it through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] and [`repository`] provide data adapters
//! - [`clock`] and [`spawner`] are the injectable sources of time and enemies
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod clock;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;
pub mod spawner;

mod workers;

pub use api::{DispatchReceipt, Result, RuntimeError, RuntimeHandle};
pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{
    Event, EventBus, GameStateEvent, LogEvent, ProgressionEvent, TimerEvent, TimerKind, Topic,
};
pub use oracle::{
    CatalogOracleImpl, LootOracleImpl, OracleManager, PassiveTreeOracleImpl, StoneOracleImpl,
};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveEnvelope, SaveRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, TimerConfig};
pub use spawner::{EnemySpawner, RandomSpawner};
pub use workers::Cadence;
