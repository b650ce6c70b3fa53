//! Quote provider trait definitions.
//!
//! This module defines the core `QuoteProvider` trait that all
//! quote providers must implement.

use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::RawQuote;

use super::capabilities::{ProviderCapabilities, RateLimit};

/// A fully built GET request for one provider call.
///
/// The fetcher hands it to the transport either as-is or wrapped in a relay URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

impl QuoteRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Same request sent to another URL. Headers travel with it.
    pub fn with_url(&self, url: String) -> Self {
        Self {
            url,
            headers: self.headers.clone(),
        }
    }
}

/// Trait for quote providers.
///
/// A provider knows how to phrase a quote request and how to read the reply.
/// It never performs I/O itself: the fetcher decides whether the request goes
/// out directly or through a relay, so both paths share one parser.
///
/// # Example
///
/// ```ignore
/// use marketpulse_market_data::provider::{QuoteProvider, ProviderCapabilities, RateLimit};
///
/// struct MyProvider {
///     api_key: String,
/// }
///
/// impl QuoteProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     fn capabilities(&self) -> ProviderCapabilities {
///         ProviderCapabilities {
///             instrument_kinds: &[InstrumentKind::Equity],
///             relay_access: RelayAccess::DirectOnly,
///         }
///     }
///
///     fn rate_limit(&self) -> RateLimit {
///         RateLimit::default()
///     }
///
///     // ... implement quote_request and parse_quote
/// }
/// ```
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO", "ALPHA_VANTAGE", etc.
    /// Used for logging, circuit breaker tracking, and resolution.
    fn id(&self) -> &'static str;

    /// Provider priority for ordering.
    ///
    /// Lower values = higher priority. Default is 10.
    fn priority(&self) -> u8 {
        10
    }

    /// Describes what this provider can do.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Rate limiting configuration.
    fn rate_limit(&self) -> RateLimit;

    /// Upper bound for a direct request. Relayed requests use the relay timeout.
    fn request_timeout(&self) -> Duration {
        Duration::from_secs(10)
    }

    /// Build the request for `symbol`, already in provider notation.
    fn quote_request(&self, symbol: &str) -> QuoteRequest;

    /// Parse a response body into the provider-neutral raw quote.
    ///
    /// Returns `MalformedPayload`, `SymbolNotFound` or `RateLimited` when the
    /// body cannot be used.
    fn parse_quote(&self, symbol: &str, body: &str) -> Result<RawQuote, MarketDataError>;
}
