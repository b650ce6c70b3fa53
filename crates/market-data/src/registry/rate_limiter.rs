//! Token bucket rate limiter for quote providers.
//!
//! Each provider gets its own bucket sized from its [`RateLimit`]. Callers
//! wait for a token only up to a bound; a provider whose bucket would keep
//! the dashboard waiting longer than that is skipped for this request.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, warn};
use tokio::time::Instant;

use crate::models::ProviderId;
use crate::provider::RateLimit;

/// Burst cap applied to every provider.
const MAX_BURST: u32 = 10;

#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    capacity: f64,
    /// Tokens per second.
    rate: f64,
    last_update: Instant,
}

impl TokenBucket {
    fn for_limit(limit: &RateLimit) -> Self {
        let rpm = limit.requests_per_minute.max(1);
        let capacity = f64::from(rpm.min(MAX_BURST));
        Self {
            tokens: capacity,
            capacity,
            rate: f64::from(rpm) / 60.0,
            last_update: Instant::now(),
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.last_update = now;
    }

    fn try_take(&mut self) -> bool {
        self.refill();
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn wait_time(&mut self) -> Duration {
        self.refill();
        if self.tokens >= 1.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64((1.0 - self.tokens) / self.rate)
        }
    }
}

/// Per-provider token buckets.
///
/// Providers without an explicit configuration get [`RateLimit::default`].
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, TokenBucket>>,
    limits: Mutex<HashMap<String, RateLimit>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            limits: Mutex::new(HashMap::new()),
        }
    }

    fn lock_buckets(&self) -> MutexGuard<'_, HashMap<String, TokenBucket>> {
        self.buckets.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter buckets mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn lock_limits(&self) -> MutexGuard<'_, HashMap<String, RateLimit>> {
        self.limits.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter limits mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Set the limit for a provider. Any existing bucket starts over full.
    pub fn configure(&self, provider: &ProviderId, limit: RateLimit) {
        self.lock_limits().insert(provider.to_string(), limit);
        self.lock_buckets().remove(provider.as_ref());
    }

    fn new_bucket(&self, provider: &ProviderId) -> TokenBucket {
        match self.lock_limits().get(provider.as_ref()) {
            Some(limit) => TokenBucket::for_limit(limit),
            None => TokenBucket::for_limit(&RateLimit::default()),
        }
    }

    /// Take a token without waiting.
    pub fn try_acquire(&self, provider: &ProviderId) -> bool {
        let fresh = self.new_bucket(provider);
        let mut buckets = self.lock_buckets();
        buckets
            .entry(provider.to_string())
            .or_insert(fresh)
            .try_take()
    }

    /// Wait for a token, giving up if the wait would exceed `max_wait`.
    ///
    /// Returns `false` without sleeping when the bucket cannot refill in time.
    pub async fn acquire_within(&self, provider: &ProviderId, max_wait: Duration) -> bool {
        let deadline = Instant::now() + max_wait;
        loop {
            let wait = {
                let fresh = self.new_bucket(provider);
                let mut buckets = self.lock_buckets();
                let bucket = buckets.entry(provider.to_string()).or_insert(fresh);
                if bucket.try_take() {
                    return true;
                }
                bucket.wait_time()
            };

            if Instant::now() + wait > deadline {
                debug!(
                    "Rate limiter: '{}' needs {:?}, more than allowed, skipping",
                    provider, wait
                );
                return false;
            }

            debug!("Rate limiter: waiting {:?} for '{}'", wait, provider);
            tokio::time::sleep(wait).await;
        }
    }

    pub fn remaining_tokens(&self, provider: &ProviderId) -> f64 {
        let mut buckets = self.lock_buckets();
        match buckets.get_mut(provider.as_ref()) {
            Some(bucket) => {
                bucket.refill();
                bucket.tokens
            }
            None => {
                drop(buckets);
                self.new_bucket(provider).capacity
            }
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
