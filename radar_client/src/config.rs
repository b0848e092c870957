//! Validated dashboard configuration built from [`Args`].
use std::sync::Arc;
use std::time::Duration;

use radar_common::{RadarError, Result};
use reqwest::Url;

use crate::args::Args;
use crate::source::{HttpQuoteSource, MockQuoteSource, QuoteSource};

/// Where quotes come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    /// Live quote API.
    Http {
        /// Base URL, `api/stocks` is appended.
        base_url: String,
        /// Per-request timeout.
        timeout: Duration,
    },
    /// Built-in fixed snapshot.
    Mock,
}

/// Everything the binary needs to run a session.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Quote source selection.
    pub source: SourceConfig,
    /// Polling period.
    pub refresh_interval: Duration,
    /// Completed refreshes before exiting, 0 for no limit.
    pub iterations: u64,
}

impl DashboardConfig {
    /// Instantiate the configured quote source.
    pub fn build_source(&self) -> Result<Arc<dyn QuoteSource>> {
        let source: Arc<dyn QuoteSource> = match &self.source {
            SourceConfig::Http { base_url, timeout } => {
                Arc::new(HttpQuoteSource::new(base_url, *timeout)?)
            }
            SourceConfig::Mock => Arc::new(MockQuoteSource::new()),
        };
        Ok(source)
    }
}

impl TryFrom<Args> for DashboardConfig {
    type Error = RadarError;

    fn try_from(args: Args) -> Result<Self> {
        if args.interval_ms == 0 {
            return Err(RadarError::Config(
                "--interval-ms must be greater than zero".to_string(),
            ));
        }
        if args.timeout_ms == 0 {
            return Err(RadarError::Config(
                "--timeout-ms must be greater than zero".to_string(),
            ));
        }

        let base_url = args
            .base_url
            .map(|raw| raw.trim().trim_matches('"').to_string())
            .filter(|raw| !raw.is_empty());
        let source = match base_url {
            Some(base_url) if !args.mock => {
                let parsed = Url::parse(&base_url).map_err(|e| {
                    RadarError::Config(format!("Invalid base URL {:?}: {}", base_url, e))
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(RadarError::Config(format!(
                        "Base URL must be http or https, got {}",
                        parsed.scheme()
                    )));
                }
                SourceConfig::Http {
                    base_url,
                    timeout: Duration::from_millis(args.timeout_ms),
                }
            }
            _ => SourceConfig::Mock,
        };

        Ok(DashboardConfig {
            source,
            refresh_interval: Duration::from_millis(args.interval_ms),
            iterations: args.iterations,
        })
    }
}
