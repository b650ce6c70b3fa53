//! Alpha Vantage quote provider implementation.
//!
//! Quotes come from the GLOBAL_QUOTE endpoint. Alpha Vantage reports quota
//! exhaustion inside a 200 response (`Note` / `Information`), so those bodies
//! are mapped to `RateLimited` here rather than by the transport.
//!
//! Note: Alpha Vantage free tier is limited to 5 API calls per minute.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{InstrumentKind, RawQuote};
use crate::provider::{ProviderCapabilities, QuoteProvider, QuoteRequest, RateLimit, RelayAccess};

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Alpha Vantage quote provider.
///
/// Indices are not quoted directly; the resolver maps them to tracking ETFs.
pub struct AlphaVantageProvider {
    api_key: String,
}

// ============================================================================
// Response structures for Alpha Vantage API
// ============================================================================

/// GLOBAL_QUOTE response
#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "08. previous close")]
    previous_close: Option<String>,
    #[serde(rename = "09. change")]
    change: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage provider with the given API key.
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }

    /// Check for API-level errors in the response.
    ///
    /// Any `Note` or `Information` on this endpoint means the key is out of
    /// calls; the body carries no quote in that case.
    fn check_api_error(response: &GlobalQuoteResponse) -> Result<(), MarketDataError> {
        if let Some(ref msg) = response.error_message {
            if msg.contains("Invalid API call") || msg.contains("not found") {
                return Err(MarketDataError::SymbolNotFound(msg.clone()));
            }
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: msg.clone(),
            });
        }

        if let Some(msg) = response.note.as_ref().or(response.information.as_ref()) {
            warn!("Alpha Vantage notice: {}", msg);
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        Ok(())
    }

    /// Parse a numeric field, tolerating a trailing `%`.
    fn parse_number(s: &Option<String>) -> Option<f64> {
        s.as_deref()
            .map(|v| v.trim().trim_end_matches('%'))
            .and_then(|v| v.parse::<f64>().ok())
    }
}

impl QuoteProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        1
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            instrument_kinds: &[InstrumentKind::Equity, InstrumentKind::Index],
            relay_access: RelayAccess::DirectOnly,
        }
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            requests_per_minute: 5,
            max_concurrency: 1,
            min_delay: Duration::from_secs(12),
        }
    }

    fn quote_request(&self, symbol: &str) -> QuoteRequest {
        QuoteRequest::get(format!(
            "{}?function=GLOBAL_QUOTE&symbol={}&apikey={}",
            BASE_URL,
            urlencoding::encode(symbol),
            urlencoding::encode(&self.api_key)
        ))
    }

    fn parse_quote(&self, symbol: &str, body: &str) -> Result<RawQuote, MarketDataError> {
        let response: GlobalQuoteResponse = serde_json::from_str(body)
            .map_err(|e| MarketDataError::malformed(PROVIDER_ID, e.to_string()))?;

        Self::check_api_error(&response)?;

        let quote = match response.global_quote {
            Some(q) if q.price.is_some() => q,
            _ => {
                return Err(MarketDataError::SymbolNotFound(format!(
                    "No data for symbol: {}",
                    symbol
                )))
            }
        };

        debug!("Alpha Vantage quote for {}: {:?}", symbol, quote.price);

        Ok(RawQuote {
            reported_symbol: quote.symbol.clone(),
            price: Self::parse_number(&quote.price),
            previous_close: Self::parse_number(&quote.previous_close),
            change: Self::parse_number(&quote.change),
            change_percent: Self::parse_number(&quote.change_percent),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Global Quote": {
            "01. symbol": "IBM",
            "02. open": "169.9500",
            "05. price": "171.2400",
            "07. latest trading day": "2024-05-10",
            "08. previous close": "169.2900",
            "09. change": "1.9500",
            "10. change percent": "1.1519%"
        }
    }"#;

    #[test]
    fn test_provider_id_and_priority() {
        let provider = AlphaVantageProvider::new("demo".to_string());
        assert_eq!(provider.id(), "ALPHA_VANTAGE");
        assert_eq!(provider.priority(), 1);
    }

    #[test]
    fn test_rate_limit_is_strict() {
        let provider = AlphaVantageProvider::new("demo".to_string());
        let limit = provider.rate_limit();
        assert_eq!(limit.requests_per_minute, 5);
        assert_eq!(limit.max_concurrency, 1);
        assert!(limit.is_strict());
    }

    #[test]
    fn test_quote_request_url() {
        let provider = AlphaVantageProvider::new("KEY".to_string());
        let request = provider.quote_request("SPY");
        assert_eq!(
            request.url,
            "https://www.alphavantage.co/query?function=GLOBAL_QUOTE&symbol=SPY&apikey=KEY"
        );
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_parse_global_quote() {
        let provider = AlphaVantageProvider::new("demo".to_string());
        let raw = provider.parse_quote("IBM", SAMPLE).unwrap();
        assert_eq!(raw.reported_symbol.as_deref(), Some("IBM"));
        assert_eq!(raw.price, Some(171.24));
        assert_eq!(raw.previous_close, Some(169.29));
        assert_eq!(raw.change, Some(1.95));
        assert_eq!(raw.change_percent, Some(1.1519));
    }

    #[test]
    fn test_note_means_rate_limited() {
        let provider = AlphaVantageProvider::new("demo".to_string());
        let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#;
        assert!(matches!(
            provider.parse_quote("IBM", body),
            Err(MarketDataError::RateLimited { .. })
        ));

        let body = r#"{"Information": "We have detected your API key and our standard API rate limit is 25 requests per day."}"#;
        assert!(matches!(
            provider.parse_quote("IBM", body),
            Err(MarketDataError::RateLimited { .. })
        ));
    }

    #[test]
    fn test_empty_global_quote_is_not_found() {
        let provider = AlphaVantageProvider::new("demo".to_string());
        assert!(matches!(
            provider.parse_quote("NOPE", r#"{"Global Quote": {}}"#),
            Err(MarketDataError::SymbolNotFound(_))
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let provider = AlphaVantageProvider::new("demo".to_string());
        assert!(matches!(
            provider.parse_quote("IBM", "<html>blocked</html>"),
            Err(MarketDataError::MalformedPayload { .. })
        ));
    }
}
