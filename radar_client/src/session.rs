//! One dashboard session: store, auto-refresh timer and selection, owned together.
//!
//! The session is created by the top-level view and handed to children by reference.
//! Dropping it (or calling [`DashboardSession::shutdown`]) cancels the timer.
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use log::{debug, info};
use radar_common::Quote;
use tokio::sync::watch;

use crate::model::refresh_state::RefreshState;
use crate::model::selection::SelectionController;
use crate::poller::RefreshTask;
use crate::source::QuoteSource;
use crate::store::QuoteStore;

/// What the dashboard should show right now.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// No snapshot yet and the first fetch is still pending.
    Loading,
    /// No snapshot yet and the latest attempt failed.
    Failed {
        /// Failure description.
        message: String,
    },
    /// A snapshot is available, possibly stale.
    Ready(ReadyView),
}

/// Dashboard content once data has been loaded at least once.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyView {
    /// One card per symbol, in snapshot order.
    pub cards: Vec<CardView>,
    /// Selected symbol's details, when it is present in the snapshot.
    pub detail: Option<DetailView>,
    /// Selected symbol that the snapshot no longer carries.
    pub stale_selection: Option<String>,
    /// Failure of the latest attempt, while older data stays on screen.
    pub last_error: Option<String>,
    /// Time of the last successful fetch.
    pub last_updated: Option<DateTime<Local>>,
    /// A fetch is in flight.
    pub refreshing: bool,
}

/// Summary card input.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    /// Full symbol, the key passed back on selection.
    pub symbol: String,
    /// Quote to summarise.
    pub quote: Quote,
    /// Highlight flag.
    pub selected: bool,
}

/// Detail panel input.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    /// Full symbol.
    pub symbol: String,
    /// Quote to expand.
    pub quote: Quote,
}

/// Explicit state object for one dashboard instance.
pub struct DashboardSession {
    store: QuoteStore,
    refresh_task: RefreshTask,
    selection: SelectionController,
    updates: watch::Receiver<RefreshState>,
}

impl DashboardSession {
    /// Create the store for `source` and start polling it every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(source: Arc<dyn QuoteSource>, interval: Duration) -> Self {
        let store = QuoteStore::new(source);
        let updates = store.subscribe();
        let refresh_task = RefreshTask::start(store.clone(), interval);
        info!("Dashboard session started");
        DashboardSession {
            store,
            refresh_task,
            selection: SelectionController::new(),
            updates,
        }
    }

    /// The session's store, e.g. for manual refreshes. Views taken afterwards still
    /// apply the default selection.
    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    /// Copy of the current refresh state.
    pub fn state(&self) -> RefreshState {
        self.store.state()
    }

    /// Selection state.
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Wait for the next state change and apply the default-selection rule to it.
    ///
    /// Returns `false` once the store can no longer change.
    pub async fn changed(&mut self) -> bool {
        if self.updates.changed().await.is_err() {
            return false;
        }
        self.sync_selection();
        true
    }

    /// Apply the default-selection rule to the current snapshot.
    pub fn sync_selection(&mut self) {
        if let Some(snapshot) = self.store.snapshot() {
            self.selection.on_snapshot(&snapshot);
        }
    }

    /// User picked `symbol`.
    pub fn select(&mut self, symbol: impl Into<String>) {
        self.selection.select(symbol);
    }

    /// Select from user input: a 1-based card number, a full symbol or a display
    /// symbol, matched case-insensitively against the current snapshot.
    ///
    /// Returns the selected symbol, or `None` if nothing matched.
    pub fn select_input(&mut self, input: &str) -> Option<String> {
        let snapshot = self.store.snapshot()?;
        let input = input.trim();
        let matched = match input.parse::<usize>() {
            Ok(number) => number
                .checked_sub(1)
                .and_then(|index| snapshot.symbols().nth(index)),
            Err(_) => snapshot.symbols().find(|symbol| {
                symbol.eq_ignore_ascii_case(input)
                    || radar_common::symbol::display_symbol(symbol).eq_ignore_ascii_case(input)
            }),
        }
        .map(str::to_string);

        match &matched {
            Some(symbol) => self.select(symbol.clone()),
            None => debug!("No symbol matches {:?}", input),
        }
        matched
    }

    /// Change the polling period.
    pub fn set_refresh_interval(&mut self, interval: Duration) {
        self.refresh_task.reschedule(interval);
    }

    /// Current polling period.
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_task.interval()
    }

    /// Derive the view for the current state, applying the default selection first.
    pub fn view(&mut self) -> DashboardView {
        self.sync_selection();
        let state = self.store.state();
        let snapshot = match &state.snapshot {
            Some(snapshot) => snapshot,
            None => {
                return match &state.last_error {
                    Some(err) => DashboardView::Failed {
                        message: err.to_string(),
                    },
                    None => DashboardView::Loading,
                };
            }
        };

        let cards = snapshot
            .iter()
            .map(|(symbol, quote)| CardView {
                symbol: symbol.to_string(),
                quote: quote.clone(),
                selected: self.selection.is_selected(symbol),
            })
            .collect();
        let detail = self
            .selection
            .resolve(snapshot)
            .map(|(symbol, quote)| DetailView {
                symbol: symbol.to_string(),
                quote: quote.clone(),
            });

        DashboardView::Ready(ReadyView {
            cards,
            detail,
            stale_selection: self.selection.stale_in(snapshot).map(str::to_string),
            last_error: state.last_error.as_ref().map(ToString::to_string),
            last_updated: state.last_updated,
            refreshing: state.is_loading,
        })
    }

    /// Tear the session down, cancelling the timer.
    pub fn shutdown(mut self) {
        self.refresh_task.cancel();
        info!("Dashboard session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockQuoteSource;
    use async_trait::async_trait;
    use radar_common::{FetchError, QuoteSnapshot};

    struct Failing;

    #[async_trait]
    impl QuoteSource for Failing {
        async fn fetch(&self) -> Result<QuoteSnapshot, FetchError> {
            Err(FetchError::network("connection refused"))
        }

        fn describe(&self) -> String {
            "failing".into()
        }
    }

    async fn settled(session: &mut DashboardSession) {
        while session.state().is_loading {
            assert!(session.changed().await);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn loads_then_defaults_to_first_symbol() {
        let mut session =
            DashboardSession::start(Arc::new(MockQuoteSource::new()), Duration::from_secs(30));
        assert_eq!(session.view(), DashboardView::Loading);

        settled(&mut session).await;
        assert_eq!(session.selection().selected(), Some("RELIANCE.NS"));
        match session.view() {
            DashboardView::Ready(ready) => {
                assert_eq!(ready.cards.len(), 4);
                assert!(ready.cards[0].selected);
                assert!(!ready.cards[1].selected);
                assert_eq!(ready.detail.unwrap().symbol, "RELIANCE.NS");
                assert!(ready.stale_selection.is_none());
                assert!(ready.last_error.is_none());
                assert!(!ready.refreshing);
            }
            other => panic!("unexpected view: {other:?}"),
        }
        session.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn failure_before_any_data_is_a_full_page_error() {
        let mut session = DashboardSession::start(Arc::new(Failing), Duration::from_secs(30));
        settled(&mut session).await;
        assert_eq!(
            session.view(),
            DashboardView::Failed {
                message: "failed to fetch stock data: connection refused".into()
            }
        );
        assert_eq!(session.selection().selected(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn select_input_accepts_numbers_and_symbols() {
        let mut session =
            DashboardSession::start(Arc::new(MockQuoteSource::new()), Duration::from_secs(30));
        settled(&mut session).await;

        assert_eq!(session.select_input("2").as_deref(), Some("TATAMOTORS.NS"));
        assert!(session.selection().is_selected("TATAMOTORS.NS"));
        assert_eq!(session.select_input("itc").as_deref(), Some("ITC.NS"));
        assert_eq!(session.select_input("wipro.ns").as_deref(), Some("WIPRO.NS"));
        assert_eq!(session.select_input("0"), None);
        assert_eq!(session.select_input("9"), None);
        assert_eq!(session.select_input("NOPE"), None);
        assert_eq!(session.selection().selected(), Some("WIPRO.NS"));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_selection_renders_no_detail() {
        let mut session =
            DashboardSession::start(Arc::new(MockQuoteSource::new()), Duration::from_secs(30));
        settled(&mut session).await;
        session.select("HDFCBANK.NS");

        match session.view() {
            DashboardView::Ready(ready) => {
                assert!(ready.detail.is_none());
                assert_eq!(ready.stale_selection.as_deref(), Some("HDFCBANK.NS"));
                assert!(ready.cards.iter().all(|card| !card.selected));
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn manual_refresh_gets_the_default_selection() {
        let mut session =
            DashboardSession::start(Arc::new(MockQuoteSource::new()), Duration::from_secs(30));
        session.store().refresh().await;

        match session.view() {
            DashboardView::Ready(ready) => {
                assert!(ready.cards[0].selected);
                assert_eq!(ready.detail.unwrap().symbol, "RELIANCE.NS");
            }
            other => panic!("unexpected view: {other:?}"),
        }
        assert_eq!(session.selection().selected(), Some("RELIANCE.NS"));
        session.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn interval_can_be_changed() {
        let mut session =
            DashboardSession::start(Arc::new(MockQuoteSource::new()), Duration::from_secs(30));
        session.set_refresh_interval(Duration::from_secs(5));
        assert_eq!(session.refresh_interval(), Duration::from_secs(5));
    }
}
