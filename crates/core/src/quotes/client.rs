//! Market Data Client - Facade for the market-data crate.
//!
//! Builds the provider chain from [`DashboardConfig`] and exposes it to the
//! core as a [`QuoteClient`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info, warn};

use marketpulse_market_data::{
    AlphaVantageProvider, CircuitMetrics, FinnhubProvider, Quote, QuoteFetcher, QuoteProvider,
    RelayChain, ReqwestTransport, ResolverChain, YahooProvider,
};

use crate::dashboard::DashboardConfig;
use crate::errors::Result;

/// How a batch of symbols is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPacing {
    /// All symbols at once.
    Concurrent,
    /// One symbol at a time with `delay` between calls.
    Sequential { delay: Duration },
}

/// Quote source used by the dashboard.
#[async_trait]
pub trait QuoteClient: Send + Sync {
    /// Current quote for `symbol`.
    ///
    /// `as_of` is the caller's local calendar date. Sources without live
    /// data price the symbol for that date.
    async fn quote(&self, symbol: &str, as_of: NaiveDate) -> Result<Quote>;

    /// Pacing callers should use for batches.
    fn batch_pacing(&self) -> BatchPacing;
}

/// Market data client - facade for fetching quotes via the market-data crate.
///
/// Handles:
/// - Provider initialization with API keys
/// - Relay rotation setup
/// - Translating the primary provider's quota into [`BatchPacing`]
pub struct MarketDataClient {
    fetcher: Arc<QuoteFetcher>,
    pacing_delay: Duration,
}

impl MarketDataClient {
    /// Create a client with providers initialized from `config`.
    ///
    /// Providers that need an API key are skipped when none is configured.
    /// With no provider at all every quote is synthetic.
    pub fn new(config: &DashboardConfig) -> Self {
        let providers = Self::create_providers(config);

        if providers.is_empty() {
            warn!("No quote providers configured, every quote will be synthetic");
        } else {
            info!(
                "Market data client initialized with {} providers: {:?}",
                providers.len(),
                providers.iter().map(|p| p.id()).collect::<Vec<_>>()
            );
        }

        let fetcher = QuoteFetcher::new(
            providers,
            Arc::new(ResolverChain::new()),
            Arc::new(ReqwestTransport::new()),
        )
        .with_relays(RelayChain::new(config.relays.clone(), config.relay_timeout));

        Self::with_fetcher(Arc::new(fetcher), config.pacing_delay)
    }

    /// Wrap an already built fetcher.
    pub fn with_fetcher(fetcher: Arc<QuoteFetcher>, pacing_delay: Duration) -> Self {
        Self {
            fetcher,
            pacing_delay,
        }
    }

    pub fn fetcher(&self) -> &QuoteFetcher {
        &self.fetcher
    }

    /// Circuit state per provider, for health reporting.
    pub fn circuit_metrics(&self) -> Vec<CircuitMetrics> {
        self.fetcher.circuit_metrics()
    }

    fn create_providers(config: &DashboardConfig) -> Vec<Arc<dyn QuoteProvider>> {
        let mut providers: Vec<Arc<dyn QuoteProvider>> = Vec::new();

        match non_empty(&config.alpha_vantage_api_key) {
            Some(key) => providers.push(Arc::new(AlphaVantageProvider::new(key))),
            None => debug!("ALPHA_VANTAGE requires an API key but none found, skipping"),
        }

        if config.yahoo_enabled {
            providers.push(Arc::new(YahooProvider::new()));
        }

        match non_empty(&config.finnhub_api_key) {
            Some(key) => providers.push(Arc::new(FinnhubProvider::new(key))),
            None => debug!("FINNHUB requires an API key but none found, skipping"),
        }

        providers
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl QuoteClient for MarketDataClient {
    async fn quote(&self, symbol: &str, as_of: NaiveDate) -> Result<Quote> {
        let (quote, diagnostics) = self
            .fetcher
            .fetch_quote_with_diagnostics_on(symbol, as_of)
            .await;
        debug!("{} quoted by {}: {}", symbol, quote.source, diagnostics.summary());
        Ok(quote)
    }

    fn batch_pacing(&self) -> BatchPacing {
        match self.fetcher.primary_rate_limit() {
            Some(limit) if limit.is_strict() => BatchPacing::Sequential {
                delay: self.pacing_delay.max(limit.min_delay),
            },
            _ => BatchPacing::Concurrent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketpulse_market_data::{SyntheticQuoteGenerator, SYNTHETIC_SOURCE};

    fn offline_config() -> DashboardConfig {
        DashboardConfig {
            yahoo_enabled: false,
            relays: Vec::new(),
            ..DashboardConfig::default()
        }
    }

    #[test]
    fn test_providers_follow_configuration() {
        let client = MarketDataClient::new(&DashboardConfig {
            alpha_vantage_api_key: Some("demo".to_string()),
            finnhub_api_key: Some("  ".to_string()),
            ..DashboardConfig::default()
        });
        assert_eq!(client.fetcher().provider_ids(), vec!["ALPHA_VANTAGE", "YAHOO"]);
    }

    #[test]
    fn test_strict_primary_paces_batches() {
        // Alpha Vantage asks for at least 12s between calls.
        let config = DashboardConfig {
            alpha_vantage_api_key: Some("demo".to_string()),
            pacing_delay: Duration::from_millis(250),
            ..DashboardConfig::default()
        };
        assert_eq!(
            MarketDataClient::new(&config).batch_pacing(),
            BatchPacing::Sequential {
                delay: Duration::from_secs(12)
            }
        );

        let slower = DashboardConfig {
            alpha_vantage_api_key: Some("demo".to_string()),
            pacing_delay: Duration::from_secs(20),
            ..DashboardConfig::default()
        };
        assert_eq!(
            MarketDataClient::new(&slower).batch_pacing(),
            BatchPacing::Sequential {
                delay: Duration::from_secs(20)
            }
        );

        let yahoo_only = DashboardConfig::default();
        assert_eq!(
            MarketDataClient::new(&yahoo_only).batch_pacing(),
            BatchPacing::Concurrent
        );
    }

    #[tokio::test]
    async fn test_no_providers_quotes_synthetic() {
        let client = MarketDataClient::new(&offline_config());
        let as_of = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
        let quote = client.quote("AAPL", as_of).await.unwrap();
        assert_eq!(quote.source, SYNTHETIC_SOURCE);
        assert!(quote.price > 0.0);
        assert_eq!(quote, SyntheticQuoteGenerator::new().quote("AAPL", as_of));
    }
}
