use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Normalized quote handed to the dashboard layer.
///
/// `change_percent` is relative to the previous close, i.e.
/// `change / (price - change) * 100`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Current price
    pub price: f64,

    /// Absolute change since the previous close
    pub change: f64,

    /// Percent change since the previous close
    pub change_percent: f64,

    /// Source of the quote (YAHOO, ALPHA_VANTAGE, FINNHUB, SYNTHETIC)
    pub source: String,
}

impl Quote {
    /// Create a quote from explicit values
    pub fn new(price: f64, change: f64, change_percent: f64, source: impl Into<String>) -> Self {
        Self {
            price,
            change,
            change_percent,
            source: source.into(),
        }
    }

    /// Create a quote from the current price and previous close
    pub fn from_previous_close(price: f64, previous_close: f64, source: impl Into<String>) -> Self {
        let change = price - previous_close;
        let change_percent = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };
        Self::new(price, change, change_percent, source)
    }

    /// Price at the previous close implied by this quote
    pub fn previous_close(&self) -> f64 {
        self.price - self.change
    }
}

/// Provider payload reduced to the fields every adapter can report.
///
/// Providers differ in which of these they send; [`RawQuote::normalize`]
/// derives the rest.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawQuote {
    /// Instrument the provider says it priced, when the payload carries one
    pub reported_symbol: Option<String>,
    pub price: Option<f64>,
    pub previous_close: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
}

impl RawQuote {
    /// Turns the raw payload into a [`Quote`].
    ///
    /// Price is required and must be positive. The delta comes from the
    /// explicit change field or from the previous close; the percent is
    /// derived from the delta when the provider omits it.
    pub fn normalize(&self, provider: &str) -> Result<Quote, MarketDataError> {
        let price = match self.price {
            Some(p) if p.is_finite() && p > 0.0 => p,
            Some(p) => {
                return Err(MarketDataError::malformed(
                    provider,
                    format!("unusable price {}", p),
                ))
            }
            None => return Err(MarketDataError::malformed(provider, "missing price")),
        };

        let change = match (self.change, self.previous_close) {
            (Some(c), _) if c.is_finite() => c,
            (_, Some(prev)) if prev.is_finite() && prev > 0.0 => price - prev,
            _ => {
                return Err(MarketDataError::malformed(
                    provider,
                    "neither change nor previous close present",
                ))
            }
        };

        let change_percent = match self.change_percent {
            Some(pct) if pct.is_finite() => pct,
            _ => {
                let base = price - change;
                if base > 0.0 {
                    change / base * 100.0
                } else {
                    0.0
                }
            }
        };

        Ok(Quote::new(price, change, change_percent, provider))
    }
}
