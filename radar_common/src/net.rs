//! Data-source location constants and helpers.

/// Base URL of the quote API used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";
/// Path of the snapshot endpoint, relative to the base URL.
pub const STOCKS_PATH: &str = "api/stocks";

/// Join a base URL and the snapshot path like "<base>/api/stocks".
///
/// A missing trailing slash on `base` is tolerated.
pub fn stocks_url(base: &str) -> String {
    if base.ends_with('/') {
        format!("{}{}", base, STOCKS_PATH)
    } else {
        format!("{}/{}", base, STOCKS_PATH)
    }
}
