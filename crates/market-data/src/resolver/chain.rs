//! Resolver chain - composite resolver that tries resolvers in order.
//!
//! The resolver chain is the main entry point for symbol resolution. It
//! combines multiple resolvers and tries them in order until one succeeds.

use crate::errors::MarketDataError;
use crate::models::ProviderId;

use super::override_resolver::OverrideResolver;
use super::rules_resolver::RulesResolver;
use super::traits::{ResolvedSymbol, Resolver, SymbolResolver};

/// Composite resolver that tries multiple resolvers in order.
///
/// The resolution order is:
/// 1. Configured overrides
/// 2. Alias rules (always last)
///
/// The chain stops at the first resolver that returns a result.
pub struct ResolverChain {
    resolvers: Vec<Box<dyn Resolver>>,
    rules_resolver: RulesResolver,
}

impl ResolverChain {
    /// Create a new ResolverChain with no overrides.
    pub fn new() -> Self {
        Self::with_overrides(OverrideResolver::new())
    }

    /// Create a ResolverChain that consults `overrides` before the rules.
    pub fn with_overrides(overrides: OverrideResolver) -> Self {
        Self {
            resolvers: vec![Box::new(overrides)],
            rules_resolver: RulesResolver::new(),
        }
    }

    /// Add a custom resolver to the chain.
    ///
    /// The resolver is added before the rules resolver (which is always last).
    pub fn add_resolver(&mut self, resolver: Box<dyn Resolver>) {
        self.resolvers.push(resolver);
    }
}

impl Default for ResolverChain {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolResolver for ResolverChain {
    fn resolve(
        &self,
        provider: &ProviderId,
        symbol: &str,
    ) -> Result<ResolvedSymbol, MarketDataError> {
        for resolver in &self.resolvers {
            if let Some(result) = resolver.resolve(provider, symbol) {
                return result;
            }
        }

        if let Some(result) = self.rules_resolver.resolve(provider, symbol) {
            return result;
        }

        Err(MarketDataError::ResolutionFailed {
            provider: provider.to_string(),
        })
    }
}
