//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! dispatching actions or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{Action, ActionKind, GameState, Rejection, Resolution};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// What happened to one dispatched action.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchReceipt {
    pub kind: ActionKind,
    pub stats_recomputed: bool,
    /// Log lines produced by the action, oldest first.
    pub new_log_entries: Vec<String>,
    pub rejection: Option<Rejection>,
    pub resolution: Option<Resolution>,
    /// True when the resulting state was written to the save repository.
    pub persisted: bool,
}

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Apply an action and wait for its receipt.
    pub async fn dispatch(&self, action: Action) -> Result<DispatchReceipt> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Dispatch {
                action,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Queue an action without waiting for it to be applied.
    ///
    /// Actions are applied strictly in arrival order together with
    /// dispatched ones.
    pub async fn enqueue(&self, action: Action) -> Result<()> {
        self.send(Command::Dispatch {
            action,
            reply: None,
        })
        .await
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - applied actions and persistence results
    /// - `Topic::Log` - new log lines, animation commands already parsed
    /// - `Topic::Progression` - level-ups, kills and loot conversion
    /// - `Topic::Timer` - timers starting and stopping
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }
}
