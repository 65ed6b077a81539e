//! Persistence worker that keeps save I/O off the simulation task.
//!
//! The simulation worker captures a snapshot after every persisted action and
//! queues it here. Saves are written one at a time, in the order they were
//! queued, on tokio's blocking pool. A dispatch receipt that waits on a save
//! is released once the write has finished.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use game_core::{SaveSnapshot, Timestamp};

use crate::api::DispatchReceipt;
use crate::events::{Event, EventBus, GameStateEvent};
use crate::repository::SaveRepository;

/// Receipt held back until its save is written.
pub(crate) type PendingReceipt = (DispatchReceipt, oneshot::Sender<DispatchReceipt>);

/// One queued save.
pub struct SaveJob {
    pub snapshot: SaveSnapshot,
    /// Time of the action that produced the snapshot.
    pub at: Timestamp,
    pub(crate) receipt: Option<PendingReceipt>,
}

/// Background task that writes saves to the repository.
pub struct PersistenceWorker {
    repository: Arc<dyn SaveRepository>,
    job_rx: mpsc::Receiver<SaveJob>,
    event_bus: EventBus,
}

impl PersistenceWorker {
    pub(crate) fn new(
        repository: Arc<dyn SaveRepository>,
        job_rx: mpsc::Receiver<SaveJob>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            repository,
            job_rx,
            event_bus,
        }
    }

    /// Runs until every sender is dropped and the queue is drained.
    pub async fn run(mut self) {
        while let Some(job) = self.job_rx.recv().await {
            let SaveJob {
                snapshot,
                at,
                receipt,
            } = job;
            let persisted = self.save(snapshot, at).await;
            if let Some((mut receipt, reply)) = receipt {
                receipt.persisted = persisted;
                release(reply, receipt);
            }
        }
        debug!(target: "runtime::persistence", "persistence worker stopped");
    }

    async fn save(&self, snapshot: SaveSnapshot, at: Timestamp) -> bool {
        let repository = Arc::clone(&self.repository);
        let written =
            tokio::task::spawn_blocking(move || repository.save_state(&snapshot)).await;

        let error = match written {
            Ok(Ok(())) => {
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::Persisted { at }));
                return true;
            }
            Ok(Err(error)) => error.to_string(),
            Err(join) => join.to_string(),
        };
        warn!(target: "runtime::persistence", %error, "failed to persist game state");
        self.event_bus
            .publish(Event::GameState(GameStateEvent::PersistFailed { error }));
        false
    }
}

/// Hands a receipt back to its caller.
pub(crate) fn release(reply: oneshot::Sender<DispatchReceipt>, receipt: DispatchReceipt) {
    if reply.send(receipt).is_err() {
        debug!("Dispatch reply channel closed (caller dropped)");
    }
}
