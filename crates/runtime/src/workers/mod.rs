//! Background tasks that back the runtime orchestration.
//!
//! The simulation worker is the single consumer of the command queue and the
//! only owner of the game state; the timers are producers that enqueue
//! actions into that queue. The persistence worker writes the saves the
//! simulation worker hands it.

mod persistence;
mod simulation;
mod timers;

pub(crate) use persistence::PersistenceWorker;
pub use simulation::{Cadence, Command, SimulationWorker};
pub(crate) use timers::TimerSet;
