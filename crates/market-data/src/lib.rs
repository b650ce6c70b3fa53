//! MarketPulse Market Data Crate
//!
//! This crate turns a dashboard symbol into a [`Quote`], trying live
//! providers first and falling back to deterministic synthetic data.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Equities and market indices (caret notation)
//! - Multiple providers: Alpha Vantage, Yahoo Finance, Finnhub
//! - Relay (CORS proxy) rotation for providers that block direct calls
//! - Rate limiting, circuit breaking and payload validation
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  Dashboard symbol |  (AAPL, ^GSPC)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Resolver      |  (overrides, then index proxy rules)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |    Provider      | --> |    Transport     |  (direct or via relay)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! |  RawQuote        |  (normalized + validated)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |     Quote        |  (or synthetic when every tier failed)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`QuoteFetcher`] - The ordered provider chain
//! - [`Quote`] - Price, absolute change, percent change and source tag
//! - [`QuoteProvider`] - Request builder and parser for one upstream API
//! - [`HttpTransport`] - The network seam, mocked in tests
//! - [`SyntheticQuoteGenerator`] - Deterministic last-resort quotes

pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod relay;
pub mod resolver;
pub mod synthetic;
pub mod transport;

pub use errors::{MarketDataError, RetryClass};

pub use models::{
    normalize_symbol, InstrumentKind, ProviderId, ProviderSymbol, Quote, RawQuote,
    SYNTHETIC_SOURCE,
};

pub use resolver::{
    OverrideResolver, ResolutionSource, ResolvedSymbol, Resolver, ResolverChain, RulesResolver,
    SymbolResolver,
};

pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::finnhub::FinnhubProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::{ProviderCapabilities, QuoteProvider, QuoteRequest, RateLimit, RelayAccess};

pub use registry::{
    CircuitBreaker, CircuitBreakerConfig, CircuitMetrics, CircuitState, FetchDiagnostics,
    FetchRoute, ProviderAttempt, QuoteFetcher, QuoteValidator, RateLimiter, SkipReason,
    ValidationSeverity, ValidatorConfig,
};

pub use relay::{default_relays, RelayChain, RelayEndpoint, DEFAULT_RELAY_TIMEOUT};
pub use synthetic::{base_price, symbol_seed, SyntheticQuoteGenerator};
pub use transport::{HttpTransport, ReqwestTransport};
