//! Provider capabilities and rate limiting configuration.
//!
//! This module defines structures for describing what a quote provider
//! can do, how it may be reached, and how it should be rate-limited.

use std::time::Duration;

use crate::models::InstrumentKind;

/// How a provider's endpoint may be reached.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RelayAccess {
    /// Only direct requests. Relays are never tried.
    DirectOnly,
    /// Direct request first, then the relay rotation if it fails.
    DirectThenRelay,
    /// Skip the direct request and go straight to the relays.
    RelayOnly,
}

impl RelayAccess {
    pub fn tries_direct(self) -> bool {
        !matches!(self, Self::RelayOnly)
    }

    pub fn tries_relays(self) -> bool {
        !matches!(self, Self::DirectOnly)
    }
}

/// Describes the capabilities of a quote provider.
///
/// Used by the fetcher to determine which providers can handle
/// a symbol and through which path.
#[derive(Clone, Debug)]
pub struct ProviderCapabilities {
    /// Instrument kinds this provider supports.
    pub instrument_kinds: &'static [InstrumentKind],

    /// Whether the provider may be reached through relay endpoints.
    pub relay_access: RelayAccess,
}

impl ProviderCapabilities {
    pub fn supports(&self, kind: InstrumentKind) -> bool {
        self.instrument_kinds.contains(&kind)
    }
}

/// Rate limiting configuration for a provider.
///
/// Controls how aggressively we can call a provider to avoid
/// hitting their rate limits and getting blocked.
#[derive(Clone, Debug)]
pub struct RateLimit {
    /// Maximum requests allowed per minute.
    pub requests_per_minute: u32,

    /// Maximum concurrent requests to this provider.
    pub max_concurrency: usize,

    /// Minimum delay between requests.
    pub min_delay: Duration,
}

impl RateLimit {
    /// Whether batch callers should pace themselves instead of fanning out.
    pub fn is_strict(&self) -> bool {
        self.max_concurrency <= 1 || self.requests_per_minute <= 10
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            max_concurrency: 5,
            min_delay: Duration::from_millis(100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_access_paths() {
        assert!(RelayAccess::DirectOnly.tries_direct());
        assert!(!RelayAccess::DirectOnly.tries_relays());
        assert!(RelayAccess::DirectThenRelay.tries_direct());
        assert!(RelayAccess::DirectThenRelay.tries_relays());
        assert!(!RelayAccess::RelayOnly.tries_direct());
        assert!(RelayAccess::RelayOnly.tries_relays());
    }

    #[test]
    fn test_strict_rate_limit() {
        assert!(!RateLimit::default().is_strict());
        let free_tier = RateLimit {
            requests_per_minute: 5,
            max_concurrency: 1,
            min_delay: Duration::from_secs(12),
        };
        assert!(free_tier.is_strict());
    }
}
