//! Per-provider circuit breaker.
//!
//! A provider that keeps failing at the transport level (quota exhausted,
//! timeouts, 5xx) is taken out of the quote chain for a cool-down period so
//! that every dashboard refresh does not pay for the same dead endpoint.
//!
//! - **Closed**: requests flow.
//! - **Open**: the provider is skipped until the cool-down elapses.
//! - **HalfOpen**: probe requests flow; enough successes close the circuit,
//!   any failure reopens it.
//!
//! State is in-memory only and starts closed on every process start.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::Serialize;

use crate::models::ProviderId;

/// Circuit breaker state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "Closed"),
            Self::Open => write!(f, "Open"),
            Self::HalfOpen => write!(f, "HalfOpen"),
        }
    }
}

/// Circuit breaker configuration.
#[derive(Clone, Debug)]
pub struct CircuitBreakerConfig {
    /// Consecutive penalised failures before the circuit opens.
    pub failure_threshold: u32,
    /// How long an open circuit stays open.
    pub cool_down: Duration,
    /// Successful probes needed to close from HalfOpen.
    pub probe_successes: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        // Free-tier quotas reset per minute, so a short cool-down is enough.
        Self {
            failure_threshold: 3,
            cool_down: Duration::from_secs(60),
            probe_successes: 1,
        }
    }
}

#[derive(Debug)]
struct Circuit {
    state: CircuitState,
    failures: u32,
    probes_ok: u32,
    opened_at: Option<Instant>,
}

impl Circuit {
    fn closed() -> Self {
        Self {
            state: CircuitState::Closed,
            failures: 0,
            probes_ok: 0,
            opened_at: None,
        }
    }

    fn open(&mut self, now: Instant) {
        self.state = CircuitState::Open;
        self.probes_ok = 0;
        self.opened_at = Some(now);
    }

    /// Moves Open to HalfOpen once the cool-down has passed.
    fn poll(&mut self, now: Instant, cool_down: Duration) -> bool {
        match self.state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let cooled = self
                    .opened_at
                    .map_or(true, |at| now.duration_since(at) >= cool_down);
                if cooled {
                    self.state = CircuitState::HalfOpen;
                    self.probes_ok = 0;
                }
                cooled
            }
        }
    }
}

/// Snapshot of one provider's circuit.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitMetrics {
    pub provider: String,
    pub state: CircuitState,
    pub failure_count: u32,
}

/// Thread-safe per-provider circuit breaker.
pub struct CircuitBreaker {
    circuits: Mutex<HashMap<String, Circuit>>,
    config: CircuitBreakerConfig,
}

impl CircuitBreaker {
    pub fn new() -> Self {
        Self::with_config(CircuitBreakerConfig::default())
    }

    pub fn with_config(config: CircuitBreakerConfig) -> Self {
        Self {
            circuits: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// A poisoned table only means a panic happened mid-update; the counts
    /// are still usable.
    fn lock_circuits(&self) -> MutexGuard<'_, HashMap<String, Circuit>> {
        self.circuits.lock().unwrap_or_else(|poisoned| {
            warn!("Circuit breaker mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Whether a request to `provider` may go out now.
    pub fn is_allowed(&self, provider: &ProviderId) -> bool {
        let mut circuits = self.lock_circuits();
        let circuit = circuits
            .entry(provider.to_string())
            .or_insert_with(Circuit::closed);

        let before = circuit.state;
        let allowed = circuit.poll(Instant::now(), self.config.cool_down);
        if before == CircuitState::Open && circuit.state == CircuitState::HalfOpen {
            info!("Circuit for '{}' half-open, probing", provider);
        }
        allowed
    }

    pub fn record_success(&self, provider: &ProviderId) {
        let mut circuits = self.lock_circuits();
        let circuit = circuits
            .entry(provider.to_string())
            .or_insert_with(Circuit::closed);

        match circuit.state {
            CircuitState::Closed => circuit.failures = 0,
            CircuitState::HalfOpen => {
                circuit.probes_ok += 1;
                if circuit.probes_ok >= self.config.probe_successes {
                    info!("Circuit for '{}' closed after successful probe", provider);
                    *circuit = Circuit::closed();
                }
            }
            CircuitState::Open => {
                debug!("Late success for '{}' while open, ignored", provider);
            }
        }
    }

    pub fn record_failure(&self, provider: &ProviderId) {
        let mut circuits = self.lock_circuits();
        let circuit = circuits
            .entry(provider.to_string())
            .or_insert_with(Circuit::closed);
        let now = Instant::now();

        circuit.failures += 1;
        match circuit.state {
            CircuitState::Closed if circuit.failures >= self.config.failure_threshold => {
                info!(
                    "Circuit for '{}' opened after {} failures",
                    provider, circuit.failures
                );
                circuit.open(now);
            }
            CircuitState::Closed => {
                debug!(
                    "Failure for '{}' ({}/{})",
                    provider, circuit.failures, self.config.failure_threshold
                );
            }
            CircuitState::HalfOpen => {
                info!("Probe for '{}' failed, circuit reopened", provider);
                circuit.open(now);
            }
            CircuitState::Open => circuit.opened_at = Some(now),
        }
    }

    pub fn state(&self, provider: &ProviderId) -> CircuitState {
        self.lock_circuits()
            .get(provider.as_ref())
            .map_or(CircuitState::Closed, |c| c.state)
    }

    pub fn failure_count(&self, provider: &ProviderId) -> u32 {
        self.lock_circuits()
            .get(provider.as_ref())
            .map_or(0, |c| c.failures)
    }

    pub fn reset_all(&self) {
        self.lock_circuits().clear();
    }

    /// Every circuit seen so far, sorted by provider.
    pub fn metrics(&self) -> Vec<CircuitMetrics> {
        let mut metrics: Vec<_> = self
            .lock_circuits()
            .iter()
            .map(|(provider, circuit)| CircuitMetrics {
                provider: provider.clone(),
                state: circuit.state,
                failure_count: circuit.failures,
            })
            .collect();
        metrics.sort_by(|a, b| a.provider.cmp(&b.provider));
        metrics
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new()
    }
}
