//! Selected-symbol tracking for the detail panel.
//!
//! The first non-empty snapshot selects its first symbol when nothing is selected
//! yet. After that the selection only moves on explicit [`SelectionController::select`]
//! calls; a later snapshot that no longer carries the symbol leaves it stale, and
//! [`SelectionController::resolve`] then yields nothing.
use log::debug;
use radar_common::{Quote, QuoteSnapshot};

/// Currently selected symbol.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<String>,
}

impl SelectionController {
    /// Controller with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `symbol` unconditionally.
    pub fn select(&mut self, symbol: impl Into<String>) {
        let symbol = symbol.into();
        debug!("Selected {}", symbol);
        self.selected = Some(symbol);
    }

    /// The selected symbol, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether `symbol` is the selected one.
    pub fn is_selected(&self, symbol: &str) -> bool {
        self.selected.as_deref() == Some(symbol)
    }

    /// Apply the one-time default for a fresh snapshot.
    ///
    /// Returns `true` if this call made the selection.
    pub fn on_snapshot(&mut self, snapshot: &QuoteSnapshot) -> bool {
        if self.selected.is_some() {
            return false;
        }
        match snapshot.first_symbol() {
            Some(first) => {
                debug!("Defaulting selection to {}", first);
                self.selected = Some(first.to_string());
                true
            }
            None => false,
        }
    }

    /// The selected symbol and its quote, when the snapshot still carries it.
    pub fn resolve<'a>(&self, snapshot: &'a QuoteSnapshot) -> Option<(&'a str, &'a Quote)> {
        let selected = self.selected.as_deref()?;
        snapshot
            .iter()
            .find(|(symbol, _)| *symbol == selected)
    }

    /// Selected symbol missing from `snapshot`.
    pub fn stale_in<'a>(&'a self, snapshot: &QuoteSnapshot) -> Option<&'a str> {
        self.selected
            .as_deref()
            .filter(|symbol| !snapshot.contains(symbol))
    }
}
