//! Provider orchestration.
//!
//! This module ties the providers together:
//! - priority ordering and relay fallback ([`QuoteFetcher`])
//! - rate limiting per provider
//! - circuit breaking for fault tolerance
//! - quote data validation

mod circuit_breaker;
mod quote_fetcher;
mod rate_limiter;
mod skip_reason;
mod validator;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitMetrics, CircuitState};
pub use quote_fetcher::QuoteFetcher;
pub use rate_limiter::RateLimiter;
pub use skip_reason::{FetchDiagnostics, FetchRoute, ProviderAttempt, SkipReason};
pub use validator::{QuoteValidator, ValidationIssue, ValidationSeverity, ValidatorConfig};
