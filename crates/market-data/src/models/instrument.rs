use serde::{Deserialize, Serialize};

/// Instrument classification used for provider capability matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentKind {
    /// Individual listed stock or ETF
    #[default]
    Equity,
    /// Market index (caret notation, e.g. `^GSPC`)
    Index,
}

impl InstrumentKind {
    /// Classifies a dashboard symbol. Caret-prefixed symbols are indices.
    pub fn of(symbol: &str) -> Self {
        if symbol.trim_start().starts_with('^') {
            Self::Index
        } else {
            Self::Equity
        }
    }
}

/// Normalizes a symbol for identity comparison: trimmed, upper-cased,
/// leading `^` removed.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().trim_start_matches('^').to_uppercase()
}
