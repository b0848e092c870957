//! State owned by the quote store.
//!
//! Mutated only by `QuoteStore::refresh` through [`RefreshState::begin`] and
//! [`RefreshState::settle`]. A failure never touches the snapshot, and the last
//! error is only replaced by a success or by a newer failure.
use std::sync::Arc;

use chrono::{DateTime, Local};
use radar_common::{FetchError, QuoteSnapshot};

/// Latest known quotes plus fetch bookkeeping.
#[derive(Debug, Clone)]
pub struct RefreshState {
    /// Last successfully fetched snapshot; `None` until the first success.
    pub snapshot: Option<Arc<QuoteSnapshot>>,
    /// `true` while a fetch is outstanding, and from creation until the first one settles.
    pub is_loading: bool,
    /// Most recent failure, cleared by the next success.
    pub last_error: Option<FetchError>,
    /// Wall-clock time of the last successful fetch.
    pub last_updated: Option<DateTime<Local>>,
    in_flight: usize,
}

impl Default for RefreshState {
    fn default() -> Self {
        RefreshState {
            snapshot: None,
            is_loading: true,
            last_error: None,
            last_updated: None,
            in_flight: 0,
        }
    }
}

impl RefreshState {
    /// Number of fetches currently outstanding.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Nothing was ever loaded and the latest attempt failed.
    pub fn failed_without_data(&self) -> bool {
        self.snapshot.is_none() && self.last_error.is_some()
    }

    /// A fetch has started.
    pub fn begin(&mut self) {
        self.in_flight += 1;
        self.is_loading = true;
    }

    /// A fetch has finished; its outcome overwrites whatever settled before it.
    pub fn settle(&mut self, outcome: Result<QuoteSnapshot, FetchError>) {
        match outcome {
            Ok(snapshot) => {
                self.snapshot = Some(Arc::new(snapshot));
                self.last_error = None;
                self.last_updated = Some(Local::now());
            }
            Err(err) => self.last_error = Some(err),
        }
        self.finish();
    }

    /// A fetch was dropped before it produced an outcome.
    pub fn abandon(&mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.is_loading = self.in_flight > 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_common::Quote;

    fn snapshot(symbols: &[&str]) -> QuoteSnapshot {
        symbols
            .iter()
            .map(|s| {
                (
                    s.to_string(),
                    Quote {
                        current_price: 10.0,
                        previous_close: 9.0,
                        open: 9.5,
                        high: 10.5,
                        low: 9.0,
                        volume: 100,
                        market_cap: 1000.0,
                        dividend_yield: 0.0,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn starts_loading_with_nothing_else() {
        let state = RefreshState::default();
        assert!(state.is_loading);
        assert!(state.snapshot.is_none());
        assert!(state.last_error.is_none());
        assert!(!state.failed_without_data());
    }

    #[test]
    fn success_replaces_snapshot_and_clears_error() {
        let mut state = RefreshState::default();
        state.begin();
        state.settle(Err(FetchError::network("down")));
        assert!(state.failed_without_data());

        state.begin();
        state.settle(Ok(snapshot(&["A", "B"])));
        assert_eq!(state.snapshot.as_deref(), Some(&snapshot(&["A", "B"])));
        assert!(state.last_error.is_none());
        assert!(state.last_updated.is_some());
        assert!(!state.is_loading);
    }

    #[test]
    fn failure_keeps_the_same_snapshot() {
        let mut state = RefreshState::default();
        state.begin();
        state.settle(Ok(snapshot(&["A"])));
        let before = state.snapshot.clone().unwrap();

        state.begin();
        state.settle(Err(FetchError::status("500 Internal Server Error")));
        assert!(Arc::ptr_eq(state.snapshot.as_ref().unwrap(), &before));
        assert_eq!(
            state.last_error,
            Some(FetchError::status("500 Internal Server Error"))
        );
        assert!(!state.failed_without_data());
    }

    #[test]
    fn starting_a_fetch_keeps_the_previous_error() {
        let mut state = RefreshState::default();
        state.begin();
        state.settle(Err(FetchError::network("down")));
        state.begin();
        assert!(state.is_loading);
        assert_eq!(state.last_error, Some(FetchError::network("down")));
    }

    #[test]
    fn overlapping_fetches_keep_loading_until_the_last_settles() {
        let mut state = RefreshState::default();
        state.begin();
        state.begin();
        state.settle(Err(FetchError::network("down")));
        assert!(state.is_loading);
        state.settle(Ok(snapshot(&["A"])));
        assert!(!state.is_loading);
        assert!(state.last_error.is_none());
        assert_eq!(state.in_flight(), 0);
    }

    #[test]
    fn abandoned_fetch_releases_the_loading_flag() {
        let mut state = RefreshState::default();
        state.begin();
        state.abandon();
        assert!(!state.is_loading);
        assert!(state.snapshot.is_none());
    }
}
