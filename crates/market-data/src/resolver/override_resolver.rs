//! Override resolver - resolves from configured per-provider symbol overrides.
//!
//! This is the first resolver in the chain. It checks whether an explicit
//! provider symbol was configured for the requested dashboard symbol.

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::MarketDataError;
use crate::models::ProviderId;

use super::traits::{ResolutionSource, ResolvedSymbol, Resolver};

/// Resolves provider symbols from explicit overrides.
///
/// Keys are `(provider, symbol)` with the symbol upper-cased.
#[derive(Debug, Default, Clone)]
pub struct OverrideResolver {
    overrides: HashMap<(String, String), Arc<str>>,
}

impl OverrideResolver {
    /// Create an empty OverrideResolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `provider_symbol` whenever `provider` is asked for `symbol`.
    pub fn insert(&mut self, provider: &str, symbol: &str, provider_symbol: &str) {
        self.overrides.insert(
            (provider.to_string(), symbol.trim().to_uppercase()),
            Arc::from(provider_symbol),
        );
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl Resolver for OverrideResolver {
    fn resolve(
        &self,
        provider: &ProviderId,
        symbol: &str,
    ) -> Option<Result<ResolvedSymbol, MarketDataError>> {
        let key = (provider.to_string(), symbol.trim().to_uppercase());
        let symbol = self.overrides.get(&key)?;

        Some(Ok(ResolvedSymbol {
            symbol: symbol.clone(),
            source: ResolutionSource::Override,
        }))
    }
}
