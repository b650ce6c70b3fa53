//! Error types and failover classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all quote fetching operations
//! - [`RetryClass`]: Classification for deciding how the fallback chain reacts

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while fetching quotes.
///
/// None of these ever reach dashboard callers: the quote fetcher absorbs them
/// and falls through to the next tier, ending in synthetic data.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider does not know the requested symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429/403 or a quota notice).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request (direct or relayed) did not complete in time.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-2xx, bad key, transport failure).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The payload was missing expected fields or carried unusable values.
    #[error("Malformed payload from {provider}: {message}")]
    MalformedPayload {
        /// The provider whose payload could not be used
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// The provider priced a different instrument than the one requested.
    #[error("Symbol mismatch from {provider}: requested {requested}, got {reported}")]
    SymbolMismatch {
        /// The provider that answered
        provider: String,
        /// Symbol we asked for (provider notation)
        requested: String,
        /// Symbol reported in the response metadata
        reported: String,
    },

    /// Symbol resolution failed for a specific provider.
    #[error("Resolution failed for provider: {provider}")]
    ResolutionFailed {
        /// The provider that failed to resolve the symbol
        provider: String,
    },

    /// The circuit breaker is open for this provider.
    #[error("Circuit open: {provider}")]
    CircuitOpen {
        /// The provider with an open circuit
        provider: String,
    },

    /// The normalized quote failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// Every relay endpoint failed for this provider.
    #[error("All relays failed for {provider}")]
    RelayFailed {
        /// The provider being relayed
        provider: String,
    },

    /// No providers are configured for this kind of instrument.
    #[error("No providers available")]
    NoProvidersAvailable,

    /// All providers were tried and all failed.
    #[error("All providers failed")]
    AllProvidersFailed,

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the failover classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use marketpulse_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited { provider: "YAHOO".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::FailoverWithPenalty);
    ///
    /// let error = MarketDataError::SymbolNotFound("INVALID".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::NextProvider);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::RateLimited { .. }
            | Self::Timeout { .. }
            | Self::ProviderError { .. }
            | Self::RelayFailed { .. }
            | Self::Network(_) => RetryClass::FailoverWithPenalty,

            Self::SymbolNotFound(_)
            | Self::MalformedPayload { .. }
            | Self::SymbolMismatch { .. }
            | Self::ResolutionFailed { .. }
            | Self::ValidationFailed { .. } => RetryClass::NextProvider,

            Self::CircuitOpen { .. } => RetryClass::CircuitOpen,

            Self::NoProvidersAvailable | Self::AllProvidersFailed => RetryClass::Never,
        }
    }

    pub(crate) fn malformed(provider: &str, message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}
