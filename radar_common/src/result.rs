//! Result type alias shared across the workspace.
//!
//! Defaults the error type to `RadarError`, so functions can simply return `Result<T>`.
use crate::error::RadarError;

/// Workspace-wide `Result` alias with `RadarError` as the default error.
pub type Result<T, E = RadarError> = std::result::Result<T, E>;
