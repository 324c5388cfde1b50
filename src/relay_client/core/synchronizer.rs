use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::relay_client::gateway::DeviceGateway;
use crate::relay_client::models::SyncSnapshot;

use super::reducer::{reduce, PollOutcome};
use super::scheduler::RepeatingTask;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

type Observer = Box<dyn Fn(&SyncSnapshot) + Send + Sync>;

struct State {
    snapshot: SyncSnapshot,
    last_contact: Option<DateTime<Utc>>,
}

/// Replacement and notification both happen under this lock, so observers
/// see snapshots in replacement order and `stop` can fence them off.
struct Delivery {
    stopped: bool,
    observers: Vec<Observer>,
}

struct Shared {
    state: Mutex<State>,
    delivery: Mutex<Delivery>,
}

/// Keeps a local mirror of the device's relay state by polling it.
///
/// Cloning is cheap and every clone shares the same snapshot.
#[derive(Clone)]
pub struct Synchronizer {
    gateway: Arc<dyn DeviceGateway>,
    shared: Arc<Shared>,
    poll_interval: Duration,
}

/// Returned by [`Synchronizer::start`]; pass it back to [`Synchronizer::stop`].
pub struct PollHandle {
    task: RepeatingTask,
}

impl PollHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Synchronizer {
    pub fn new(gateway: Arc<dyn DeviceGateway>) -> Self {
        Self::with_interval(gateway, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(gateway: Arc<dyn DeviceGateway>, poll_interval: Duration) -> Self {
        Self {
            gateway,
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    snapshot: SyncSnapshot::default(),
                    last_contact: None,
                }),
                delivery: Mutex::new(Delivery {
                    stopped: false,
                    observers: Vec::new(),
                }),
            }),
            poll_interval,
        }
    }

    pub(crate) fn gateway(&self) -> Arc<dyn DeviceGateway> {
        self.gateway.clone()
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        lock(&self.shared.state).snapshot
    }

    /// Wall-clock time of the last successful poll.
    pub fn last_contact(&self) -> Option<DateTime<Utc>> {
        lock(&self.shared.state).last_contact
    }

    pub fn is_stopped(&self) -> bool {
        lock(&self.shared.delivery).stopped
    }

    /// Register a callback fired with every replaced snapshot.
    ///
    /// Callbacks run on the polling task and must not call `subscribe` or
    /// `stop` themselves. Reading `snapshot()` is fine.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&SyncSnapshot) + Send + Sync + 'static,
    {
        let mut delivery = lock(&self.shared.delivery);
        if delivery.stopped {
            debug!("Ignoring subscription on stopped synchronizer");
            return;
        }
        delivery.observers.push(Box::new(observer));
    }

    /// Start polling: once right away, then every poll interval.
    pub fn start(&self) -> PollHandle {
        info!(interval_ms = self.poll_interval.as_millis() as u64, "Starting relay polling");
        let synchronizer = self.clone();
        let task = RepeatingTask::spawn(self.poll_interval, move || {
            let synchronizer = synchronizer.clone();
            async move {
                synchronizer.refresh().await;
            }
        });
        PollHandle { task }
    }

    /// Tear down: no snapshot replacement or observer call happens once this
    /// returns, including results of polls still in flight.
    pub fn stop(&self, handle: PollHandle) {
        {
            let mut delivery = lock(&self.shared.delivery);
            delivery.stopped = true;
            delivery.observers.clear();
        }
        handle.task.cancel();
        info!("Stopped relay polling");
    }

    /// Poll the device once, outside the schedule.
    ///
    /// Returns the snapshot it produced, or `None` when the synchronizer was
    /// stopped before the result arrived.
    pub async fn refresh(&self) -> Option<SyncSnapshot> {
        match self.gateway.fetch_status().await {
            Ok(status) => {
                let (previous, next) = self.apply(&PollOutcome::Success(status))?;
                if !previous.connected {
                    info!("Relay device reachable");
                }
                debug!(
                    relay1_active = next.relay1.active,
                    relay1_remaining = next.relay1.remaining_seconds,
                    relay2_active = next.relay2.active,
                    relay2_remaining = next.relay2.remaining_seconds,
                    "Polled relay status"
                );
                Some(next)
            }
            Err(err) => {
                let (previous, next) = self.apply(&PollOutcome::Failure)?;
                if previous.connected {
                    warn!(error = %err, transport = err.is_transport(), "Lost connection to relay device");
                } else {
                    debug!(error = %err, "Relay device still unreachable");
                }
                Some(next)
            }
        }
    }

    /// Same effect on the snapshot as a failed poll.
    pub(crate) fn mark_disconnected(&self) -> Option<SyncSnapshot> {
        self.apply(&PollOutcome::Failure).map(|(_, next)| next)
    }

    fn apply(&self, outcome: &PollOutcome) -> Option<(SyncSnapshot, SyncSnapshot)> {
        let delivery = lock(&self.shared.delivery);
        if delivery.stopped {
            debug!("Dropping poll result after stop");
            return None;
        }

        let (previous, next) = {
            let mut state = lock(&self.shared.state);
            let previous = state.snapshot;
            state.snapshot = reduce(&previous, outcome);
            if matches!(outcome, PollOutcome::Success(_)) {
                state.last_contact = Some(Utc::now());
            }
            (previous, state.snapshot)
        };

        for observer in &delivery.observers {
            observer(&next);
        }
        Some((previous, next))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
