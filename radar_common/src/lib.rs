//!
//! Common types and helpers for the stock radar dashboard.
//!
//! This crate aggregates:
//! - `error`: `RadarError` and the single refresh failure kind `FetchError`.
//! - `result`: handy `Result<T, RadarError>` alias.
//! - `quote`: `Quote` and the order-preserving `QuoteSnapshot` with validated decoding.
//! - `symbol`: exchange-qualified symbol helpers.
//! - `format`: percent change, number and currency formatting.
//! - `net`: data-source location constants.
#![warn(missing_docs)]
pub mod error;
pub mod format;
pub mod net;
pub mod quote;
pub mod result;
pub mod symbol;

pub use error::{FetchError, FetchErrorKind, RadarError};
pub use quote::{Quote, QuoteSnapshot};
pub use result::Result;
