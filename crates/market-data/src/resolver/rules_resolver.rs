//! Rules resolver - deterministic symbol alias rules.
//!
//! Equities keep their ticker on every provider. Indices are passed through
//! to providers that quote them natively and mapped to a tracking ETF for
//! providers that do not.

use std::sync::Arc;

use crate::errors::MarketDataError;
use crate::models::{InstrumentKind, ProviderId};

use super::traits::{ResolutionSource, ResolvedSymbol, Resolver};

/// Providers that accept caret index notation as is.
const NATIVE_INDEX_PROVIDERS: &[&str] = &["YAHOO"];

/// Providers that can quote an index through its tracking ETF.
const PROXY_INDEX_PROVIDERS: &[&str] = &["ALPHA_VANTAGE", "FINNHUB"];

/// Index to tracking ETF.
const INDEX_PROXIES: &[(&str, &str)] = &[("^GSPC", "SPY"), ("^IXIC", "QQQ"), ("^DJI", "DIA")];

/// Resolves provider symbols from the alias rules.
///
/// # Supported Providers
///
/// - `YAHOO`: symbols unchanged (`^GSPC`, `AAPL`)
/// - `ALPHA_VANTAGE`, `FINNHUB`: equities unchanged, indices as ETFs (`^GSPC` -> `SPY`)
#[derive(Debug, Default, Clone, Copy)]
pub struct RulesResolver;

impl RulesResolver {
    /// Create a new RulesResolver.
    pub fn new() -> Self {
        Self
    }

    /// Tracking ETF for an index, if one is known.
    pub fn index_proxy(symbol: &str) -> Option<&'static str> {
        INDEX_PROXIES
            .iter()
            .find(|(index, _)| index.eq_ignore_ascii_case(symbol))
            .map(|(_, etf)| *etf)
    }

    fn resolve_index(&self, symbol: &str, provider: &ProviderId) -> Option<Arc<str>> {
        if NATIVE_INDEX_PROVIDERS.contains(&provider.as_ref()) {
            return Some(Arc::from(symbol));
        }
        if PROXY_INDEX_PROVIDERS.contains(&provider.as_ref()) {
            return Self::index_proxy(symbol).map(Arc::from);
        }
        None
    }
}

impl Resolver for RulesResolver {
    fn resolve(
        &self,
        provider: &ProviderId,
        symbol: &str,
    ) -> Option<Result<ResolvedSymbol, MarketDataError>> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return None;
        }

        let resolved = match InstrumentKind::of(&symbol) {
            InstrumentKind::Equity => Arc::from(symbol.as_str()),
            InstrumentKind::Index => self.resolve_index(&symbol, provider)?,
        };

        Some(Ok(ResolvedSymbol {
            symbol: resolved,
            source: ResolutionSource::Rules,
        }))
    }
}
