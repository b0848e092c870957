//! Auto-refresh timer.
//!
//! [`RefreshTask::start`] refreshes the store immediately and then once per interval
//! until the task is cancelled. Every tick spawns its refresh without waiting for the
//! previous one, so a slow source never delays the schedule.
//!
//! Shutdown and rescheduling:
//! - `cancel` aborts the timer together with every refresh it spawned; no tick can
//!   fire afterwards. Calling it again is a no-op, and dropping the handle cancels too.
//! - `reschedule` replaces only the timer, so there is never more than one per task.
//!   Refreshes already in flight run to completion and apply their outcome.
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, info};
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{self, MissedTickBehavior};

use crate::store::QuoteStore;

/// Default polling period.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(30_000);

/// Refreshes spawned by any timer of one task, shared across reschedules.
#[derive(Default)]
struct InFlight {
    handles: Vec<AbortHandle>,
    closed: bool,
}

type SharedInFlight = Arc<Mutex<InFlight>>;

/// Cancellable repeating refresh of a [`QuoteStore`].
pub struct RefreshTask {
    store: QuoteStore,
    interval: Duration,
    handle: Option<JoinHandle<()>>,
    in_flight: SharedInFlight,
}

impl RefreshTask {
    /// Start refreshing `store` now and every `interval` after.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(store: QuoteStore, interval: Duration) -> Self {
        let in_flight = SharedInFlight::default();
        let handle = Self::spawn_timer(store.clone(), interval, in_flight.clone());
        info!(
            "Auto-refresh started every {:?} from {}",
            interval,
            store.source_description()
        );
        RefreshTask {
            store,
            interval,
            handle: Some(handle),
            in_flight,
        }
    }

    /// Current polling period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the timer is still scheduled.
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Replace the polling period: the old timer stops ticking and a new one starts
    /// with an immediate refresh.
    pub fn reschedule(&mut self, interval: Duration) {
        if self.is_active() && interval == self.interval {
            return;
        }
        self.stop_timer();
        self.interval = interval;
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closed = false;
        self.handle = Some(Self::spawn_timer(
            self.store.clone(),
            interval,
            self.in_flight.clone(),
        ));
        info!("Auto-refresh rescheduled every {:?}", interval);
    }

    /// Stop all future refreshes and abort the ones still running.
    pub fn cancel(&mut self) {
        let stopped = self.stop_timer();
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.closed = true;
        for handle in in_flight.handles.drain(..) {
            handle.abort();
        }
        if stopped {
            info!("Auto-refresh cancelled");
        }
    }

    fn stop_timer(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    fn spawn_timer(
        store: QuoteStore,
        interval: Duration,
        in_flight: SharedInFlight,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let mut tracked = in_flight.lock().unwrap_or_else(PoisonError::into_inner);
                // cancelled while this tick was being handled
                if tracked.closed {
                    return;
                }
                debug!("Refresh tick");
                let store = store.clone();
                let refresh = tokio::spawn(async move { store.refresh().await });
                tracked.handles.retain(|handle| !handle.is_finished());
                tracked.handles.push(refresh.abort_handle());
            }
        })
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
