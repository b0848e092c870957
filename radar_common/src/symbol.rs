//! Exchange-qualified symbols like `RELIANCE.NS`.
//!
//! The full symbol is the canonical key everywhere; only presentation strips the
//! exchange suffix.
use strum::{Display, EnumString};

/// Exchanges recognised by their symbol suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Exchange {
    /// National Stock Exchange of India.
    #[strum(to_string = "NS")]
    Nse,
    /// Bombay Stock Exchange.
    #[strum(to_string = "BO")]
    Bse,
}

impl Exchange {
    /// Long display name.
    pub fn full_name(&self) -> &'static str {
        match self {
            Exchange::Nse => "National Stock Exchange of India",
            Exchange::Bse => "Bombay Stock Exchange",
        }
    }
}

/// Ticker part of a symbol: everything before the first `.`.
pub fn display_symbol(symbol: &str) -> &str {
    symbol.split('.').next().unwrap_or(symbol)
}

/// Exchange named by the symbol suffix, if it is a known one.
pub fn exchange_of(symbol: &str) -> Option<Exchange> {
    symbol
        .split_once('.')
        .and_then(|(_, suffix)| suffix.parse().ok())
}
