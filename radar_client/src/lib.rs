//! Stock radar dashboard.
//!
//! Polls a quote source on a timer, keeps the last good snapshot through failures and
//! tracks which symbol the detail panel shows. Modules:
//! - `source`: the `QuoteSource` seam with HTTP and mock implementations.
//! - `model`: refresh and selection state.
//! - `store`: `QuoteStore` and its refresh operation.
//! - `poller`: the cancellable auto-refresh timer.
//! - `session`: one dashboard instance and the view it derives.
//! - `chart`, `render`: text presentation.
//! - `args`, `config`, `command`: CLI and interactive input.
#![warn(missing_docs)]
pub mod args;
pub mod chart;
pub mod command;
pub mod config;
pub mod model;
pub mod poller;
pub mod render;
pub mod session;
pub mod source;
pub mod store;

pub use session::{DashboardSession, DashboardView};
pub use source::{HttpQuoteSource, MockQuoteSource, QuoteSource};
pub use store::{Notice, QuoteStore};
