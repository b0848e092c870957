//! Command-line arguments for the dashboard.
//!
//! This module defines the CLI interface using `clap`. Options can also come from the
//! environment; see `config` for validation and defaults.
use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Live stock quotes in the terminal", long_about = None)]
pub struct Args {
    /// Base URL of the quote API (the snapshot is read from `<base>api/stocks`).
    /// Without it the built-in mock data is shown.
    #[clap(long, env = "RADAR_BASE_URL")]
    pub base_url: Option<String>,

    /// Use the built-in mock data even if a base URL is configured.
    #[clap(long)]
    pub mock: bool,

    /// Refresh interval in milliseconds.
    #[clap(long, env = "RADAR_REFRESH_MS", default_value_t = 30_000)]
    pub interval_ms: u64,

    /// HTTP request timeout in milliseconds.
    #[clap(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Exit after this many completed refreshes (0 runs until `q` or Ctrl+C).
    #[clap(long, default_value_t = 0)]
    pub iterations: u64,
}
