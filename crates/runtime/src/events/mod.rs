//! Topic-based event routing.
//!
//! The simulation worker and the timers publish here; clients subscribe to
//! the topics they care about through [`crate::RuntimeHandle`].

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{GameStateEvent, LogEvent, ProgressionEvent, TimerEvent, TimerKind};
