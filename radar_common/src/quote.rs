//! Quote payloads and the snapshot they arrive in.
//!
//! The data source answers with a JSON object keyed by exchange-qualified symbol,
//! each value carrying the snake_case fields of [`Quote`]. Decoding goes through
//! [`QuoteSnapshot::from_json_slice`], which relies on serde for field presence and
//! types and then checks value ranges, so a malformed body is reported as an error
//! instead of leaking half-valid data into the dashboard.
//!
//! Key order is the order of the source document and is preserved end to end.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::RadarError;
use crate::format::calculate_change;
use crate::result::Result;

/// One security's trading metrics at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Last traded price.
    pub current_price: f64,
    /// Close of the previous session.
    pub previous_close: f64,
    /// Opening price of the current session.
    pub open: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Shares traded in the session.
    pub volume: u64,
    /// Market capitalisation in currency units.
    pub market_cap: f64,
    /// Dividend yield in percentage points.
    pub dividend_yield: f64,
}

impl Quote {
    /// Percent change of the current price against the previous close, rounded to 2 decimals.
    pub fn change_percent(&self) -> f64 {
        calculate_change(self.current_price, self.previous_close)
    }

    /// `true` when the price is flat or up against the previous close.
    pub fn is_up(&self) -> bool {
        self.change_percent() >= 0.0
    }

    /// Check the value ranges serde cannot express.
    ///
    /// `high >= low` is not checked: the source is trusted on that.
    pub fn validate(&self, symbol: &str) -> Result<()> {
        let non_negative = [
            ("current_price", self.current_price),
            ("previous_close", self.previous_close),
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("market_cap", self.market_cap),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(RadarError::InvalidQuote {
                    symbol: symbol.to_string(),
                    field,
                    reason: format!("must be finite and non-negative, got {}", value),
                });
            }
        }
        if !self.dividend_yield.is_finite() {
            return Err(RadarError::InvalidQuote {
                symbol: symbol.to_string(),
                field: "dividend_yield",
                reason: format!("must be finite, got {}", self.dividend_yield),
            });
        }
        Ok(())
    }
}

/// All quotes from one fetch, keyed by symbol, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteSnapshot(IndexMap<String, Quote>);

impl QuoteSnapshot {
    /// Decode and validate a snapshot from a JSON body.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let snapshot: QuoteSnapshot = serde_json::from_slice(bytes)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Validate every quote in the snapshot.
    pub fn validate(&self) -> Result<()> {
        for (symbol, quote) in &self.0 {
            if symbol.trim().is_empty() {
                return Err(RadarError::InvalidQuote {
                    symbol: symbol.clone(),
                    field: "symbol",
                    reason: "must not be empty".to_string(),
                });
            }
            quote.validate(symbol)?;
        }
        Ok(())
    }

    /// Quote for `symbol`, if present.
    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.0.get(symbol)
    }

    /// Whether `symbol` is part of this snapshot.
    pub fn contains(&self, symbol: &str) -> bool {
        self.0.contains_key(symbol)
    }

    /// First symbol in source order.
    pub fn first_symbol(&self) -> Option<&str> {
        self.0.keys().next().map(String::as_str)
    }

    /// Symbols in source order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(symbol, quote)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Quote)> {
        self.0.iter().map(|(symbol, quote)| (symbol.as_str(), quote))
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot holds no quotes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Quote)> for QuoteSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, Quote)>>(iter: I) -> Self {
        QuoteSnapshot(iter.into_iter().collect())
    }
}
