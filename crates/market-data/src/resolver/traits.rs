//! Resolution traits for the market data crate.
//!
//! Defines the core abstractions for resolving dashboard symbols to
//! provider-specific symbols.

use crate::errors::MarketDataError;
use crate::models::{ProviderId, ProviderSymbol};

/// Resolution result containing the provider symbol and its source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSymbol {
    /// The symbol in provider notation.
    pub symbol: ProviderSymbol,
    /// Where this resolution came from.
    pub source: ResolutionSource,
}

/// Indicates how a symbol was resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolutionSource {
    /// From a configured per-provider override.
    Override,
    /// From the deterministic alias rules.
    Rules,
}

/// Individual resolver in the resolution chain.
///
/// Resolvers are tried in order until one returns a result.
/// Returning `None` means this resolver cannot handle the request,
/// and the chain should try the next resolver.
pub trait Resolver: Send + Sync {
    /// Attempt to resolve a provider-specific symbol.
    ///
    /// # Returns
    /// * `Some(Ok(resolved))` - Successfully resolved
    /// * `Some(Err(error))` - Error during resolution (stops the chain)
    /// * `None` - This resolver cannot handle the request (try next)
    fn resolve(
        &self,
        provider: &ProviderId,
        symbol: &str,
    ) -> Option<Result<ResolvedSymbol, MarketDataError>>;
}

/// Main symbol resolver interface.
///
/// Combines multiple resolvers and provides a unified resolution interface.
pub trait SymbolResolver: Send + Sync {
    /// Resolve a provider-specific symbol.
    ///
    /// Unlike `Resolver::resolve`, this always returns a result (not Option).
    /// If resolution fails, returns `ResolutionFailed`.
    fn resolve(&self, provider: &ProviderId, symbol: &str)
        -> Result<ResolvedSymbol, MarketDataError>;
}
