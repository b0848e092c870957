//! Quote store: the polled snapshot and the refresh operation.
//!
//! The store owns a [`RefreshState`] behind a `tokio::sync::watch` channel, which
//! serialises writers and lets views wait for changes. `refresh` never fails from
//! the caller's point of view: a failed fetch is logged, recorded in `last_error` and
//! announced on the notice channel, while the previous snapshot stays in place.
//!
//! Overlapping refreshes are allowed. Each applies its own outcome when it settles,
//! so the last one to settle wins.
use std::sync::Arc;

use log::warn;
use radar_common::{FetchError, QuoteSnapshot};
use tokio::sync::{broadcast, watch};

use crate::model::refresh_state::RefreshState;
use crate::source::QuoteSource;

/// Capacity of the notice channel; slow listeners only miss old toasts.
const NOTICE_CAPACITY: usize = 16;

/// Transient, fire-and-forget user notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A refresh failed; `message` describes why.
    FetchFailed {
        /// Failure description.
        message: String,
    },
}

struct StoreInner {
    source: Arc<dyn QuoteSource>,
    state: watch::Sender<RefreshState>,
    notices: broadcast::Sender<Notice>,
}

/// Shared handle to the quote store. Clones refer to the same state.
#[derive(Clone)]
pub struct QuoteStore {
    inner: Arc<StoreInner>,
}

impl QuoteStore {
    /// Store reading from `source`, in the initial loading state.
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        let (state, _) = watch::channel(RefreshState::default());
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        QuoteStore {
            inner: Arc::new(StoreInner {
                source,
                state,
                notices,
            }),
        }
    }

    /// Fetch a fresh snapshot and apply the outcome.
    ///
    /// Read the state after this future completes to observe the result.
    pub async fn refresh(&self) {
        let pending = Pending::begin(&self.inner.state);
        let outcome = self.inner.source.fetch().await;
        if let Err(err) = &outcome {
            warn!("Refresh from {} failed: {}", self.inner.source.describe(), err);
        }
        let failure = outcome.as_ref().err().map(FetchError::to_string);
        pending.settle(outcome);
        if let Some(message) = failure {
            // no listener is fine
            let _ = self.inner.notices.send(Notice::FetchFailed { message });
        }
    }

    /// Copy of the current state.
    pub fn state(&self) -> RefreshState {
        self.inner.state.borrow().clone()
    }

    /// Current snapshot, if one was ever loaded.
    pub fn snapshot(&self) -> Option<Arc<QuoteSnapshot>> {
        self.inner.state.borrow().snapshot.clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<RefreshState> {
        self.inner.state.subscribe()
    }

    /// Receiver for transient notices.
    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.inner.notices.subscribe()
    }

    /// Description of the underlying source.
    pub fn source_description(&self) -> String {
        self.inner.source.describe()
    }
}

/// One outstanding fetch. Dropping it unsettled (task aborted) releases the loading flag.
struct Pending<'a> {
    state: &'a watch::Sender<RefreshState>,
    settled: bool,
}

impl<'a> Pending<'a> {
    fn begin(state: &'a watch::Sender<RefreshState>) -> Self {
        state.send_modify(RefreshState::begin);
        Pending {
            state,
            settled: false,
        }
    }

    fn settle(mut self, outcome: Result<QuoteSnapshot, FetchError>) {
        self.settled = true;
        self.state.send_modify(|state| state.settle(outcome));
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.state.send_modify(RefreshState::abandon);
        }
    }
}
