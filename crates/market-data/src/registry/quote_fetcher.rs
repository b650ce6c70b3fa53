//! Quote fetcher: the ordered provider chain with relay and synthetic tiers.
//!
//! For each symbol the fetcher walks the providers in priority order:
//! - skip if the provider cannot quote this kind of instrument
//! - skip if its circuit is open
//! - resolve the symbol into provider notation, skip on failure
//! - take a rate limiter token, skip if none arrives in time
//! - request directly and/or through the relay rotation
//! - parse, check the reported instrument, normalize, validate
//!
//! When every provider fails, [`QuoteFetcher::fetch_quote`] falls back to
//! the synthetic generator, so it always yields a quote.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use log::{debug, info, warn};

use super::{
    CircuitBreaker, CircuitMetrics, FetchDiagnostics, FetchRoute, QuoteValidator, RateLimiter,
    SkipReason,
};
use crate::errors::{MarketDataError, RetryClass};
use crate::models::{normalize_symbol, InstrumentKind, ProviderId, Quote, RawQuote, SYNTHETIC_SOURCE};
use crate::provider::{QuoteProvider, RateLimit};
use crate::relay::RelayChain;
use crate::resolver::{ResolvedSymbol, SymbolResolver};
use crate::synthetic::SyntheticQuoteGenerator;
use crate::transport::HttpTransport;

/// Longest the fetcher waits on a provider's token bucket before moving on.
const DEFAULT_MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(2);

/// Ordered provider chain for live quotes, ending in synthetic data.
pub struct QuoteFetcher {
    providers: Vec<Arc<dyn QuoteProvider>>,
    resolver: Arc<dyn SymbolResolver>,
    transport: Arc<dyn HttpTransport>,
    relays: RelayChain,
    rate_limiter: RateLimiter,
    circuit_breaker: CircuitBreaker,
    validator: QuoteValidator,
    synthetic: SyntheticQuoteGenerator,
    max_rate_limit_wait: Duration,
}

impl QuoteFetcher {
    /// Create a fetcher over `providers`, ordered by their priority.
    ///
    /// Relays default to the built-in rotation; each provider's bucket is
    /// sized from its declared [`RateLimit`].
    pub fn new(
        mut providers: Vec<Arc<dyn QuoteProvider>>,
        resolver: Arc<dyn SymbolResolver>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        providers.sort_by_key(|p| p.priority());

        let rate_limiter = RateLimiter::new();
        for provider in &providers {
            rate_limiter.configure(&Cow::Borrowed(provider.id()), provider.rate_limit());
        }

        Self {
            providers,
            resolver,
            transport,
            relays: RelayChain::default(),
            rate_limiter,
            circuit_breaker: CircuitBreaker::new(),
            validator: QuoteValidator::new(),
            synthetic: SyntheticQuoteGenerator::new(),
            max_rate_limit_wait: DEFAULT_MAX_RATE_LIMIT_WAIT,
        }
    }

    pub fn with_relays(mut self, relays: RelayChain) -> Self {
        self.relays = relays;
        self
    }

    pub fn with_circuit_breaker(mut self, circuit_breaker: CircuitBreaker) -> Self {
        self.circuit_breaker = circuit_breaker;
        self
    }

    pub fn with_validator(mut self, validator: QuoteValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_max_rate_limit_wait(mut self, wait: Duration) -> Self {
        self.max_rate_limit_wait = wait;
        self
    }

    /// Provider ids in the order they are tried.
    pub fn provider_ids(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// Rate limit of the first provider in the chain, if any.
    pub fn primary_rate_limit(&self) -> Option<RateLimit> {
        self.providers.first().map(|p| p.rate_limit())
    }

    pub fn circuit_metrics(&self) -> Vec<CircuitMetrics> {
        self.circuit_breaker.metrics()
    }

    /// Quote for `symbol` as of today (local calendar). Never fails.
    pub async fn fetch_quote(&self, symbol: &str) -> Quote {
        self.fetch_quote_on(symbol, Local::now().date_naive()).await
    }

    /// Quote for `symbol`, falling back to the synthetic quote for `as_of`.
    pub async fn fetch_quote_on(&self, symbol: &str, as_of: NaiveDate) -> Quote {
        self.fetch_quote_with_diagnostics_on(symbol, as_of).await.0
    }

    /// Like [`fetch_quote`](Self::fetch_quote), also returning every attempt.
    pub async fn fetch_quote_with_diagnostics(&self, symbol: &str) -> (Quote, FetchDiagnostics) {
        self.fetch_quote_with_diagnostics_on(symbol, Local::now().date_naive())
            .await
    }

    /// Like [`fetch_quote_on`](Self::fetch_quote_on), also returning every attempt.
    pub async fn fetch_quote_with_diagnostics_on(
        &self,
        symbol: &str,
        as_of: NaiveDate,
    ) -> (Quote, FetchDiagnostics) {
        let mut diagnostics = FetchDiagnostics::new();

        match self.fetch_live(symbol, &mut diagnostics).await {
            Ok(quote) => (quote, diagnostics),
            Err(e) => {
                info!(
                    "No live quote for {} ({}), using synthetic. Attempts: {}",
                    symbol,
                    e,
                    diagnostics.summary()
                );
                diagnostics.record_success(Cow::Borrowed(SYNTHETIC_SOURCE), FetchRoute::Synthetic);
                (self.synthetic.quote(symbol, as_of), diagnostics)
            }
        }
    }

    /// Live quote only; no synthetic tier.
    pub async fn fetch_live_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let mut diagnostics = FetchDiagnostics::new();
        self.fetch_live(symbol, &mut diagnostics).await
    }

    async fn fetch_live(
        &self,
        symbol: &str,
        diagnostics: &mut FetchDiagnostics,
    ) -> Result<Quote, MarketDataError> {
        let kind = InstrumentKind::of(symbol);
        let mut candidates = 0usize;
        let mut last_error: Option<MarketDataError> = None;

        for provider in &self.providers {
            let provider_id: ProviderId = Cow::Borrowed(provider.id());

            if !provider.capabilities().supports(kind) {
                diagnostics.record_skip(provider_id, SkipReason::InstrumentKindMismatch);
                continue;
            }
            candidates += 1;

            if !self.circuit_breaker.is_allowed(&provider_id) {
                debug!("Circuit open for '{}', skipping", provider_id);
                diagnostics.record_skip(provider_id, SkipReason::CircuitBreakerOpen);
                continue;
            }

            let resolved = match self.resolver.resolve(&provider_id, symbol) {
                Ok(r) => r,
                Err(e) => {
                    debug!("Resolution failed for '{}': {}", provider_id, e);
                    diagnostics.record_skip(
                        provider_id,
                        SkipReason::ResolutionFailed {
                            message: e.to_string(),
                        },
                    );
                    continue;
                }
            };

            if !self
                .rate_limiter
                .acquire_within(&provider_id, self.max_rate_limit_wait)
                .await
            {
                diagnostics.record_skip(provider_id, SkipReason::RateLimited);
                continue;
            }

            debug!(
                "Fetching {} from '{}' as {} ({:?})",
                symbol, provider_id, resolved.symbol, resolved.source
            );

            match self.attempt(provider.as_ref(), symbol, kind, &resolved).await {
                Ok((quote, route)) => {
                    self.circuit_breaker.record_success(&provider_id);
                    diagnostics.record_success(provider_id, route);
                    return Ok(quote);
                }
                Err(e) => {
                    match e.retry_class() {
                        RetryClass::Never => {
                            diagnostics.record_error(provider_id, e.to_string());
                            return Err(e);
                        }
                        RetryClass::FailoverWithPenalty => {
                            self.circuit_breaker.record_failure(&provider_id);
                            warn!("Provider '{}' failed for {}: {}", provider_id, symbol, e);
                        }
                        RetryClass::NextProvider | RetryClass::CircuitOpen => {
                            info!("Provider '{}' unusable for {}: {}", provider_id, symbol, e);
                        }
                    }
                    diagnostics.record_error(provider_id, e.to_string());
                    last_error = Some(e);
                }
            }
        }

        if candidates == 0 {
            return Err(MarketDataError::NoProvidersAvailable);
        }
        Err(last_error.unwrap_or(MarketDataError::AllProvidersFailed))
    }

    /// One provider: direct request, then relays when allowed.
    async fn attempt(
        &self,
        provider: &dyn QuoteProvider,
        symbol: &str,
        kind: InstrumentKind,
        resolved: &ResolvedSymbol,
    ) -> Result<(Quote, FetchRoute), MarketDataError> {
        let access = provider.capabilities().relay_access;
        let request = provider.quote_request(&resolved.symbol);
        let accept = |body: &str| self.accept(provider, symbol, kind, resolved, body);

        let mut direct_error = None;
        if access.tries_direct() {
            let outcome = self
                .transport
                .get(&request, provider.request_timeout(), provider.id())
                .await
                .and_then(|body| accept(&body));
            match outcome {
                Ok(quote) => return Ok((quote, FetchRoute::Direct)),
                Err(e) => direct_error = Some(e),
            }
        }

        // Relays only help when the endpoint itself was unreachable.
        let relay_worthwhile = direct_error
            .as_ref()
            .map_or(true, |e| e.retry_class() == RetryClass::FailoverWithPenalty);
        if !access.tries_relays() || self.relays.is_empty() || !relay_worthwhile {
            return Err(direct_error.unwrap_or(MarketDataError::RelayFailed {
                provider: provider.id().to_string(),
            }));
        }

        if let Some(e) = &direct_error {
            debug!("Direct request to '{}' failed ({}), trying relays", provider.id(), e);
        }

        let (quote, relay) = self
            .relays
            .fetch(self.transport.as_ref(), &request, provider.id(), accept)
            .await?;
        Ok((quote, FetchRoute::Relay { name: relay }))
    }

    /// Turns a response body into a validated quote.
    fn accept(
        &self,
        provider: &dyn QuoteProvider,
        symbol: &str,
        kind: InstrumentKind,
        resolved: &ResolvedSymbol,
        body: &str,
    ) -> Result<Quote, MarketDataError> {
        let raw = provider.parse_quote(&resolved.symbol, body)?;
        Self::check_reported_symbol(provider.id(), symbol, kind, resolved, &raw)?;
        let quote = raw.normalize(provider.id())?;
        self.validator.validate(&quote)?;
        Ok(quote)
    }

    /// Rejects payloads that priced another instrument.
    ///
    /// Index notation differs between providers and relays, so index
    /// mismatches are only logged.
    fn check_reported_symbol(
        provider: &str,
        symbol: &str,
        kind: InstrumentKind,
        resolved: &ResolvedSymbol,
        raw: &RawQuote,
    ) -> Result<(), MarketDataError> {
        let Some(reported) = raw.reported_symbol.as_deref() else {
            return Ok(());
        };
        if normalize_symbol(reported) == normalize_symbol(&resolved.symbol) {
            return Ok(());
        }

        if kind == InstrumentKind::Index {
            warn!(
                "'{}' reported {} for index {}, accepting",
                provider, reported, symbol
            );
            return Ok(());
        }

        Err(MarketDataError::SymbolMismatch {
            provider: provider.to_string(),
            requested: resolved.symbol.to_string(),
            reported: reported.to_string(),
        })
    }
}
