//! Quote provider abstractions and implementations.
//!
//! This module contains:
//! - The `QuoteProvider` trait that all providers implement
//! - Provider capabilities, relay access and rate limiting configuration
//! - Concrete provider implementations (Yahoo, Alpha Vantage, Finnhub)
//!
//! # Architecture
//!
//! The provider system is designed to be:
//! - **Provider-agnostic**: The fetcher doesn't know about specific providers
//! - **Extensible**: New providers can be added by implementing `QuoteProvider`
//! - **Transport-free**: Providers build requests and parse bodies; the fetcher
//!   sends them directly or through relays
//!
//! # Symbol Resolution
//!
//! Providers receive symbols already in their own notation. Mapping dashboard
//! symbols (e.g. `^GSPC`) to provider symbols happens in the resolver module.

mod capabilities;
mod traits;

pub mod alpha_vantage;
pub mod finnhub;
pub mod yahoo;

// Re-exports
pub use capabilities::{ProviderCapabilities, RateLimit, RelayAccess};
pub use traits::{QuoteProvider, QuoteRequest};
