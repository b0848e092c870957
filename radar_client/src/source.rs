//! Where quote snapshots come from.
//!
//! The dashboard only depends on [`QuoteSource`]; two implementations ship with it:
//!
//! - [`HttpQuoteSource`]: `GET <base>api/stocks` against a live quote API.
//! - [`MockQuoteSource`]: a fixed four-symbol NSE snapshot, no network involved.
//!
//! Every failure is reported as a [`FetchError`]: transport errors, non-2xx statuses and
//! bodies that do not decode into a valid [`QuoteSnapshot`].
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use radar_common::net::stocks_url;
use radar_common::{FetchError, Quote, QuoteSnapshot, RadarError, Result};
use reqwest::Client;

/// Provider of full quote snapshots.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the full snapshot.
    async fn fetch(&self) -> Result<QuoteSnapshot, FetchError>;

    /// Short human-readable description used in logs.
    fn describe(&self) -> String;
}

/// Live source backed by the quote HTTP API.
pub struct HttpQuoteSource {
    client: Client,
    url: String,
}

impl HttpQuoteSource {
    /// Build a source for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RadarError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(HttpQuoteSource {
            client,
            url: stocks_url(base_url),
        })
    }

    /// Full URL of the snapshot endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn fetch(&self) -> Result<QuoteSnapshot, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(status.to_string()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(e.to_string()))?;
        let snapshot = QuoteSnapshot::from_json_slice(&body).map_err(FetchError::from)?;
        debug!("Fetched {} quotes from {}", snapshot.len(), self.url);
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        format!("http {}", self.url)
    }
}

/// Local stand-in for the quote API, used when no live source is configured.
#[derive(Debug, Clone)]
pub struct MockQuoteSource {
    snapshot: QuoteSnapshot,
}

impl MockQuoteSource {
    /// Source serving the built-in snapshot.
    pub fn new() -> Self {
        MockQuoteSource {
            snapshot: mock_snapshot(),
        }
    }
}

impl Default for MockQuoteSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteSource for MockQuoteSource {
    async fn fetch(&self) -> Result<QuoteSnapshot, FetchError> {
        Ok(self.snapshot.clone())
    }

    fn describe(&self) -> String {
        format!("mock ({} symbols)", self.snapshot.len())
    }
}

/// The fixed snapshot served by [`MockQuoteSource`].
pub fn mock_snapshot() -> QuoteSnapshot {
    [
        (
            "RELIANCE.NS",
            Quote {
                current_price: 1235.6,
                previous_close: 1228.3,
                open: 1230.0,
                high: 1241.8,
                low: 1225.15,
                volume: 8_432_117,
                market_cap: 16_720_000_000_000.0,
                dividend_yield: 0.41,
            },
        ),
        (
            "TATAMOTORS.NS",
            Quote {
                current_price: 572.7,
                previous_close: 613.85,
                open: 610.0,
                high: 612.4,
                low: 569.3,
                volume: 21_845_902,
                market_cap: 2_108_000_000_000.0,
                dividend_yield: 1.05,
            },
        ),
        (
            "ITC.NS",
            Quote {
                current_price: 412.35,
                previous_close: 409.9,
                open: 410.2,
                high: 414.0,
                low: 408.75,
                volume: 12_604_388,
                market_cap: 5_160_000_000_000.0,
                dividend_yield: 3.32,
            },
        ),
        (
            "WIPRO.NS",
            Quote {
                current_price: 288.05,
                previous_close: 293.9,
                open: 292.0,
                high: 293.1,
                low: 286.4,
                volume: 9_120_334,
                market_cap: 3_015_000_000_000.0,
                dividend_yield: 0.35,
            },
        ),
    ]
    .into_iter()
    .map(|(symbol, quote)| (symbol.to_string(), quote))
    .collect()
}
