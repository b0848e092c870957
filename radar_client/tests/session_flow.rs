use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use radar_client::source::{QuoteSource, mock_snapshot};
use radar_client::{DashboardSession, DashboardView};
use radar_common::{FetchError, QuoteSnapshot};
use tokio::time;

/// Serves the mock snapshot, then the same data without RELIANCE, then failures.
#[derive(Default)]
struct Shifting {
    calls: AtomicUsize,
}

#[async_trait]
impl QuoteSource for Shifting {
    async fn fetch(&self) -> Result<QuoteSnapshot, FetchError> {
        match self.calls.fetch_add(1, Ordering::SeqCst) {
            0 => Ok(mock_snapshot()),
            1 => Ok(mock_snapshot()
                .iter()
                .filter(|(symbol, _)| *symbol != "RELIANCE.NS")
                .map(|(symbol, quote)| (symbol.to_string(), quote.clone()))
                .collect()),
            _ => Err(FetchError::status("500 Internal Server Error")),
        }
    }

    fn describe(&self) -> String {
        "shifting".into()
    }
}

async fn settle(session: &mut DashboardSession) {
    while session.state().is_loading {
        assert!(session.changed().await);
    }
}

fn ready(session: &mut DashboardSession) -> radar_client::session::ReadyView {
    match session.view() {
        DashboardView::Ready(ready) => ready,
        other => panic!("expected data, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn selection_survives_refreshes_and_goes_stale() {
    let source = Arc::new(Shifting::default());
    let interval = Duration::from_secs(30);
    // wake just after each tick so its refresh has already settled
    let past_next_tick = interval + Duration::from_secs(1);
    let mut session = DashboardSession::start(source.clone(), interval);

    settle(&mut session).await;
    assert_eq!(session.selection().selected(), Some("RELIANCE.NS"));
    assert_eq!(ready(&mut session).detail.unwrap().symbol, "RELIANCE.NS");

    // next snapshot drops the selected symbol; no fallback reselection
    time::sleep(past_next_tick).await;
    settle(&mut session).await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert_eq!(session.selection().selected(), Some("RELIANCE.NS"));
    let view = ready(&mut session);
    assert_eq!(view.cards.len(), 3);
    assert!(view.detail.is_none());
    assert_eq!(view.stale_selection.as_deref(), Some("RELIANCE.NS"));

    session.select("ITC.NS");
    assert_eq!(ready(&mut session).detail.unwrap().symbol, "ITC.NS");

    // a failure keeps the stale-but-loaded data on screen
    time::sleep(past_next_tick).await;
    settle(&mut session).await;
    let view = ready(&mut session);
    assert_eq!(view.cards.len(), 3);
    assert_eq!(
        view.last_error.as_deref(),
        Some("failed to fetch stock data: 500 Internal Server Error")
    );
    assert_eq!(view.detail.unwrap().symbol, "ITC.NS");
    session.shutdown();

    let calls = source.calls.load(Ordering::SeqCst);
    time::sleep(interval * 5).await;
    assert_eq!(source.calls.load(Ordering::SeqCst), calls);
}
