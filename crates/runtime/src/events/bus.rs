//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{GameStateEvent, LogEvent, ProgressionEvent, TimerEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Applied actions and persistence outcomes
    GameState,
    /// New combat log lines, already classified
    Log,
    /// Level-ups, defeated enemies and loot conversion
    Progression,
    /// Timer lifecycle
    Timer,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    GameState(GameStateEvent),
    Log(LogEvent),
    Progression(ProgressionEvent),
    Timer(TimerEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::GameState(_) => Topic::GameState,
            Event::Log(_) => Topic::Log,
            Event::Progression(_) => Topic::Progression,
            Event::Timer(_) => Topic::Timer,
        }
    }
}

/// Topic-based event bus
///
/// Every topic owns a broadcast channel created up front, so publishing and
/// subscribing never take a lock.
#[derive(Clone)]
pub struct EventBus {
    game_state: broadcast::Sender<Event>,
    log: broadcast::Sender<Event>,
    progression: broadcast::Sender<Event>,
    timer: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            game_state: broadcast::channel(capacity).0,
            log: broadcast::channel(capacity).0,
            progression: broadcast::channel(capacity).0,
            timer: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::GameState => &self.game_state,
            Topic::Log => &self.log,
            Topic::Progression => &self.progression,
            Topic::Timer => &self.timer,
        }
    }

    /// Publish an event to its corresponding topic
    ///
    /// Events are best-effort: with no subscriber the event is dropped.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{TimerEvent, TimerKind};

    #[tokio::test]
    async fn events_only_reach_their_topic() {
        let bus = EventBus::with_capacity(4);
        let mut timers = bus.subscribe(Topic::Timer);
        let mut logs = bus.subscribe(Topic::Log);

        bus.publish(Event::Timer(TimerEvent::Stopped {
            timer: TimerKind::Channel,
        }));

        assert!(matches!(
            timers.recv().await,
            Ok(Event::Timer(TimerEvent::Stopped {
                timer: TimerKind::Channel
            }))
        ));
        assert!(logs.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::default();
        bus.publish(Event::Timer(TimerEvent::Stopped {
            timer: TimerKind::Spawn,
        }));
        assert_eq!(bus.subscribe_multiple(&[Topic::Log, Topic::GameState]).len(), 2);
    }
}
