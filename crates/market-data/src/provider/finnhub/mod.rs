//! Finnhub quote provider implementation.
//!
//! Quotes come from the `/quote` endpoint; the API key travels in the
//! `X-Finnhub-Token` header. Finnhub answers unknown symbols with an
//! all-zero body instead of an error, so `c == 0` means not found.
//!
//! Finnhub free tier is limited to 60 API calls per minute.
//! API documentation: https://finnhub.io/docs/api

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{InstrumentKind, RawQuote};
use crate::provider::{ProviderCapabilities, QuoteProvider, QuoteRequest, RateLimit, RelayAccess};

const BASE_URL: &str = "https://finnhub.io/api/v1";
const PROVIDER_ID: &str = "FINNHUB";

/// Response from /quote endpoint
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Current price
    c: Option<f64>,
    /// Change
    d: Option<f64>,
    /// Percent change
    dp: Option<f64>,
    /// Previous close
    pc: Option<f64>,
    /// Error message on bad requests
    error: Option<String>,
}

/// Finnhub quote provider.
///
/// The free tier has no index quotes, so index requests arrive here already
/// mapped to tracking ETFs by the resolver.
pub struct FinnhubProvider {
    api_key: String,
}

impl FinnhubProvider {
    /// Create a new Finnhub provider with the given API key.
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }
}

impl QuoteProvider for FinnhubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        3
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            instrument_kinds: &[InstrumentKind::Equity, InstrumentKind::Index],
            relay_access: RelayAccess::DirectOnly,
        }
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            requests_per_minute: 60,
            max_concurrency: 5,
            min_delay: Duration::from_millis(100),
        }
    }

    fn quote_request(&self, symbol: &str) -> QuoteRequest {
        QuoteRequest::get(format!(
            "{}/quote?symbol={}",
            BASE_URL,
            urlencoding::encode(symbol)
        ))
        .header("X-Finnhub-Token", self.api_key.clone())
    }

    fn parse_quote(&self, symbol: &str, body: &str) -> Result<RawQuote, MarketDataError> {
        let response: QuoteResponse = serde_json::from_str(body)
            .map_err(|e| MarketDataError::malformed(PROVIDER_ID, e.to_string()))?;

        if let Some(message) = response.error {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message,
            });
        }

        match response.c {
            None => return Err(MarketDataError::malformed(PROVIDER_ID, "missing c")),
            Some(c) if c == 0.0 => {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            Some(_) => {}
        }

        debug!(
            "Finnhub quote for {}: c={:?} d={:?} dp={:?}",
            symbol, response.c, response.d, response.dp
        );

        // Finnhub does not echo the symbol; identity cannot be checked.
        Ok(RawQuote {
            reported_symbol: None,
            price: response.c,
            previous_close: response.pc,
            change: response.d,
            change_percent: response.dp,
        })
    }
}
