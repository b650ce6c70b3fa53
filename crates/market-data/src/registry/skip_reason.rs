//! Per-attempt diagnostics for a quote fetch.

use serde::Serialize;

use crate::models::ProviderId;

/// Why a provider was skipped during fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum SkipReason {
    /// Provider doesn't quote this instrument kind.
    InstrumentKindMismatch,

    /// Circuit breaker is open for this provider.
    CircuitBreakerOpen,

    /// Token bucket would not refill within the allowed wait.
    RateLimited,

    /// Symbol resolution failed.
    ResolutionFailed { message: String },
}

/// How a successful quote reached us.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "via", rename_all = "camelCase")]
pub enum FetchRoute {
    Direct,
    Relay { name: String },
    Synthetic,
}

/// Record of a single provider attempt during a fetch.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAttempt {
    pub provider_id: ProviderId,
    pub skipped: Option<SkipReason>,
    pub error: Option<String>,
    pub route: Option<FetchRoute>,
}

impl ProviderAttempt {
    pub fn succeeded(&self) -> bool {
        self.route.is_some()
    }
}

/// Ordered record of every tier tried for one symbol.
#[derive(Clone, Debug, Default, Serialize)]
pub struct FetchDiagnostics {
    pub attempts: Vec<ProviderAttempt>,
}

impl FetchDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_skip(&mut self, provider_id: ProviderId, reason: SkipReason) {
        self.attempts.push(ProviderAttempt {
            provider_id,
            skipped: Some(reason),
            error: None,
            route: None,
        });
    }

    pub fn record_error(&mut self, provider_id: ProviderId, error: String) {
        self.attempts.push(ProviderAttempt {
            provider_id,
            skipped: None,
            error: Some(error),
            route: None,
        });
    }

    pub fn record_success(&mut self, provider_id: ProviderId, route: FetchRoute) {
        self.attempts.push(ProviderAttempt {
            provider_id,
            skipped: None,
            error: None,
            route: Some(route),
        });
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|a| match (&a.route, &a.skipped, &a.error) {
                (Some(FetchRoute::Relay { name }), _, _) => {
                    format!("{}: SUCCESS via {}", a.provider_id, name)
                }
                (Some(_), _, _) => format!("{}: SUCCESS", a.provider_id),
                (None, Some(skip), _) => format!("{}: SKIPPED ({:?})", a.provider_id, skip),
                (None, None, Some(err)) => format!("{}: ERROR ({})", a.provider_id, err),
                (None, None, None) => format!("{}: UNKNOWN", a.provider_id),
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    pub fn has_success(&self) -> bool {
        self.attempts.iter().any(ProviderAttempt::succeeded)
    }

    /// Route of the attempt that produced the quote.
    pub fn winning_route(&self) -> Option<&FetchRoute> {
        self.attempts.iter().find_map(|a| a.route.as_ref())
    }

    pub fn skip_reasons(&self) -> Vec<(&ProviderId, &SkipReason)> {
        self.attempts
            .iter()
            .filter_map(|a| a.skipped.as_ref().map(|s| (&a.provider_id, s)))
            .collect()
    }

    pub fn errors(&self) -> Vec<(&ProviderId, &str)> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_ref().map(|e| (&a.provider_id, e.as_str())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    #[test]
    fn test_diagnostics_summary() {
        let mut diag = FetchDiagnostics::new();
        diag.record_skip(Cow::Borrowed("ALPHA_VANTAGE"), SkipReason::RateLimited);
        diag.record_error(Cow::Borrowed("YAHOO"), "Timeout: YAHOO".to_string());
        diag.record_success(
            Cow::Borrowed("YAHOO"),
            FetchRoute::Relay {
                name: "corsproxy".to_string(),
            },
        );

        let summary = diag.summary();
        assert_eq!(
            summary,
            "ALPHA_VANTAGE: SKIPPED (RateLimited) -> YAHOO: ERROR (Timeout: YAHOO) -> YAHOO: SUCCESS via corsproxy"
        );
    }

    #[test]
    fn test_winning_route() {
        let mut diag = FetchDiagnostics::new();
        diag.record_skip(Cow::Borrowed("FINNHUB"), SkipReason::CircuitBreakerOpen);
        assert!(!diag.has_success());
        assert!(diag.winning_route().is_none());

        diag.record_success(Cow::Borrowed("SYNTHETIC"), FetchRoute::Synthetic);
        assert!(diag.has_success());
        assert_eq!(diag.winning_route(), Some(&FetchRoute::Synthetic));
    }

    #[test]
    fn test_skip_reasons_and_errors() {
        let mut diag = FetchDiagnostics::new();
        diag.record_skip(Cow::Borrowed("A"), SkipReason::CircuitBreakerOpen);
        diag.record_skip(
            Cow::Borrowed("B"),
            SkipReason::ResolutionFailed {
                message: "no proxy for ^N225".to_string(),
            },
        );
        diag.record_error(Cow::Borrowed("C"), "boom".to_string());

        assert_eq!(diag.skip_reasons().len(), 2);
        assert_eq!(diag.errors(), vec![(&Cow::Borrowed("C"), "boom")]);
    }
}
