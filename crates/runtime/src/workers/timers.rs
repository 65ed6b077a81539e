//! The four periodic producers.
//!
//! Timers never touch the state: they enqueue actions on the worker's queue
//! and learn about state changes only through the [`Cadence`] watch channel.
//! Every loop exits once the command channel closes.
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, trace};

use game_core::Action;

use super::Cadence;
use crate::api::RuntimeHandle;
use crate::events::{Event, EventBus, TimerEvent, TimerKind};
use crate::runtime::TimerConfig;
use crate::spawner::EnemySpawner;

/// Handles of the running timer tasks.
#[derive(Default)]
pub(crate) struct TimerSet {
    tasks: Vec<JoinHandle<()>>,
}

impl TimerSet {
    pub(crate) fn start(
        handle: &RuntimeHandle,
        cadence: watch::Receiver<Cadence>,
        spawner: Box<dyn EnemySpawner>,
        config: &TimerConfig,
        event_bus: &EventBus,
    ) -> Self {
        let timers = Timers {
            handle: handle.clone(),
            event_bus: event_bus.clone(),
        };
        let tasks = vec![
            tokio::spawn(timers.clone().spawn_loop(spawner, config.spawn_ms)),
            tokio::spawn(
                timers
                    .clone()
                    .auto_loop(cadence.clone(), config.auto_min_ms, config.auto_max_ms),
            ),
            tokio::spawn(timers.clone().channel_loop(cadence, config.channel_ms)),
            tokio::spawn(timers.fixed_loop(
                TimerKind::ManaRegen,
                config.mana_regen_ms,
                || Action::ManaRegen,
            )),
        ];
        Self { tasks }
    }

    pub(crate) fn abort(self) {
        for task in self.tasks {
            task.abort();
        }
    }
}

fn ticker(period_ms: u64) -> Interval {
    let period = Duration::from_millis(period_ms.max(1));
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

#[derive(Clone)]
struct Timers {
    handle: RuntimeHandle,
    event_bus: EventBus,
}

impl Timers {
    fn started(&self, timer: TimerKind, interval_ms: u64) {
        debug!(target: "runtime::timers", %timer, interval_ms, "timer started");
        self.event_bus
            .publish(Event::Timer(TimerEvent::Started { timer, interval_ms }));
    }

    fn stopped(&self, timer: TimerKind) {
        debug!(target: "runtime::timers", %timer, "timer stopped");
        self.event_bus
            .publish(Event::Timer(TimerEvent::Stopped { timer }));
    }

    async fn spawn_loop(self, mut spawner: Box<dyn EnemySpawner>, period_ms: u64) {
        self.started(TimerKind::Spawn, period_ms);
        let mut ticker = ticker(period_ms);
        loop {
            ticker.tick().await;
            let Ok(state) = self.handle.query_state().await else {
                break;
            };
            let wave = spawner.wave(&state);
            if wave.is_empty() {
                continue;
            }
            trace!(target: "runtime::timers", size = wave.len(), "spawning wave");
            if self.handle.enqueue(Action::Spawn(wave)).await.is_err() {
                break;
            }
        }
        self.stopped(TimerKind::Spawn);
    }

    async fn fixed_loop(self, timer: TimerKind, period_ms: u64, action: fn() -> Action) {
        self.started(timer, period_ms);
        let mut ticker = ticker(period_ms);
        loop {
            ticker.tick().await;
            if self.handle.enqueue(action()).await.is_err() {
                break;
            }
        }
        self.stopped(timer);
    }

    /// Re-arms whenever the auto-skill interval changes.
    async fn auto_loop(self, mut cadence: watch::Receiver<Cadence>, min_ms: u64, max_ms: u64) {
        let clamp = |ms: u64| ms.clamp(min_ms, max_ms.max(min_ms));
        'arm: loop {
            let interval_ms = clamp(cadence.borrow_and_update().auto_interval_ms);
            self.started(TimerKind::AutoSkills, interval_ms);
            let mut ticker = ticker(interval_ms);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if self.handle.enqueue(Action::AutoSkills).await.is_err() {
                            break 'arm;
                        }
                    }
                    changed = cadence.changed() => {
                        if changed.is_err() {
                            break 'arm;
                        }
                        if clamp(cadence.borrow().auto_interval_ms) != interval_ms {
                            continue 'arm;
                        }
                    }
                }
            }
        }
        self.stopped(TimerKind::AutoSkills);
    }

    /// Runs only while the channel skill is unlocked.
    async fn channel_loop(self, mut cadence: watch::Receiver<Cadence>, period_ms: u64) {
        loop {
            loop {
                let active = cadence.borrow_and_update().channel_active;
                if active {
                    break;
                }
                if cadence.changed().await.is_err() {
                    return;
                }
            }

            self.started(TimerKind::Channel, period_ms);
            let mut ticker = ticker(period_ms);
            let closed = loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if self.handle.enqueue(Action::ChannelWhirlwind).await.is_err() {
                            break true;
                        }
                    }
                    changed = cadence.changed() => {
                        if changed.is_err() {
                            break true;
                        }
                        if !cadence.borrow().channel_active {
                            break false;
                        }
                    }
                }
            };
            self.stopped(TimerKind::Channel);
            if closed {
                return;
            }
        }
    }
}
