//! Yahoo Finance quote provider.
//!
//! Uses the public `v8/finance/chart` endpoint, which needs no key and
//! reports the instrument it priced in `chart.result[0].meta.symbol`.
//! Yahoo often rejects requests without browser-like headers, so this
//! provider is allowed to fall back to relay endpoints.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{InstrumentKind, RawQuote};
use crate::provider::{ProviderCapabilities, QuoteProvider, QuoteRequest, RateLimit, RelayAccess};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

// ============================================================================
// Response structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    symbol: Option<String>,
    regular_market_price: Option<f64>,
    chart_previous_close: Option<f64>,
    previous_close: Option<f64>,
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance quote provider.
///
/// Quotes equities and indices in Yahoo notation (`^GSPC` is accepted as is).
#[derive(Debug, Default)]
pub struct YahooProvider;

impl YahooProvider {
    pub fn new() -> Self {
        Self
    }
}

impl QuoteProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        2
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            instrument_kinds: &[InstrumentKind::Equity, InstrumentKind::Index],
            relay_access: RelayAccess::DirectThenRelay,
        }
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            requests_per_minute: 2000,
            max_concurrency: 10,
            min_delay: Duration::from_millis(0),
        }
    }

    fn quote_request(&self, symbol: &str) -> QuoteRequest {
        QuoteRequest::get(format!(
            "{}/{}?interval=1d&range=1d",
            BASE_URL,
            urlencoding::encode(symbol)
        ))
        .header("User-Agent", USER_AGENT)
    }

    fn parse_quote(&self, symbol: &str, body: &str) -> Result<RawQuote, MarketDataError> {
        let response: ChartResponse = serde_json::from_str(body)
            .map_err(|e| MarketDataError::malformed(PROVIDER_ID, e.to_string()))?;

        if let Some(error) = response.chart.error {
            let code = error.code.unwrap_or_default();
            if code.eq_ignore_ascii_case("Not Found") {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: error.description.unwrap_or(code),
            });
        }

        let meta = response
            .chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.swap_remove(0).meta)
                }
            })
            .ok_or_else(|| MarketDataError::malformed(PROVIDER_ID, "empty chart result"))?;

        debug!(
            "Yahoo chart meta for {}: symbol={:?} price={:?}",
            symbol, meta.symbol, meta.regular_market_price
        );

        Ok(RawQuote {
            reported_symbol: meta.symbol,
            price: meta.regular_market_price,
            previous_close: meta.chart_previous_close.or(meta.previous_close),
            change: None,
            change_percent: None,
        })
    }
}
