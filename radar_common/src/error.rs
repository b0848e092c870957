//! Error types shared by the quote feed and the dashboard.
//!
//! `FetchError` is the single failure kind a refresh can produce: network
//! problems, non-2xx statuses and malformed payloads all collapse into it, with
//! `FetchErrorKind` only shaping the message. It is `Clone` so the last failure
//! can be kept in the refresh state. `RadarError` unifies everything else so
//! crates can propagate a single error type.
use std::fmt;
use std::io;

use thiserror::Error;

/// What went wrong while fetching a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The request never produced a response (connect, timeout, TLS...).
    Network,
    /// The source answered with a non-2xx status.
    Status,
    /// The body was not a valid quote snapshot.
    Malformed,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchErrorKind::Network => "network error",
            FetchErrorKind::Status => "bad status",
            FetchErrorKind::Malformed => "malformed payload",
        };
        f.write_str(name)
    }
}

/// A failed attempt to obtain a quote snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to fetch stock data: {message}")]
pub struct FetchError {
    /// Failure category. Only used to build the message.
    pub kind: FetchErrorKind,
    /// Human-readable detail.
    pub message: String,
}

impl FetchError {
    /// Creates a fetch error of the given kind.
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        FetchError {
            kind,
            message: message.into(),
        }
    }

    /// Transport-level failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Network, message)
    }

    /// Non-2xx HTTP status.
    pub fn status(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Status, message)
    }

    /// Body could not be decoded or failed validation.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Malformed, message)
    }
}

impl From<RadarError> for FetchError {
    fn from(err: RadarError) -> Self {
        match err {
            RadarError::Fetch(fetch) => fetch,
            RadarError::Io(e) => FetchError::network(e.to_string()),
            other => FetchError::malformed(other.to_string()),
        }
    }
}

/// Unified error type for the workspace.
#[derive(Error, Debug)]
pub enum RadarError {
    /// I/O error originating from the standard library or stdin/stdout.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while decoding JSON via serde_json.
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A refresh could not obtain a snapshot.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Invalid command-line or environment configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A decoded quote violates a field constraint (symbol, field name, reason).
    #[error("Invalid quote for {symbol}: {field} {reason}")]
    InvalidQuote {
        /// Symbol whose quote is invalid.
        symbol: String,
        /// Offending field, in wire (snake_case) form.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_message_always_names_the_failure() {
        let err = FetchError::status("503 Service Unavailable");
        assert_eq!(
            err.to_string(),
            "failed to fetch stock data: 503 Service Unavailable"
        );
        assert_eq!(err.kind, FetchErrorKind::Status);
    }

    #[test]
    fn invalid_quote_becomes_malformed_fetch_error() {
        let err = RadarError::InvalidQuote {
            symbol: "TCS.NS".into(),
            field: "low",
            reason: "must be finite and non-negative".into(),
        };
        let fetch = FetchError::from(err);
        assert_eq!(fetch.kind, FetchErrorKind::Malformed);
        assert!(fetch.message.contains("TCS.NS"));
    }

    #[test]
    fn wrapped_fetch_error_is_returned_unchanged() {
        let original = FetchError::network("connection refused");
        let back = FetchError::from(RadarError::from(original.clone()));
        assert_eq!(back, original);
    }
}
