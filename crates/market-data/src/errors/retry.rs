/// Classification for failover policy.
///
/// Used by the quote fetcher to decide what to do after a provider error.
///
/// # Behavior Summary
///
/// | Class | Try Next Tier? | Record Circuit Breaker Failure? |
/// |-------|----------------|--------------------------------|
/// | `Never` | No | No |
/// | `FailoverWithPenalty` | Yes | Yes (affects future requests) |
/// | `NextProvider` | Yes | No |
/// | `CircuitOpen` | Yes (skip this one) | No (already recorded) |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// The chain itself is exhausted or misconfigured; nothing left to try.
    Never,

    /// Failover to the next tier and record a circuit breaker penalty.
    ///
    /// Used for transport-level trouble: rate limiting, timeouts, HTTP errors.
    /// Enough of these open the provider's circuit and it is skipped for a while.
    FailoverWithPenalty,

    /// Try the next tier without recording any penalty.
    ///
    /// The provider answered, but the answer was unusable for this symbol
    /// (malformed payload, wrong instrument, unknown symbol).
    NextProvider,

    /// Circuit breaker is open for this provider.
    CircuitOpen,
}
