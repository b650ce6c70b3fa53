use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use log::{debug, warn};

use crate::errors::Result;
use crate::storage::KeyValueStore;
use crate::utils::time_utils::Clock;

use super::RefreshPolicy;

/// Persisted last-refresh timestamp for one dataset.
///
/// Unreadable state never blocks a refresh: a store error or a timestamp
/// that does not parse is treated as "never refreshed".
pub struct RefreshGate {
    key: String,
    policy: RefreshPolicy,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    utc_offset: FixedOffset,
}

impl RefreshGate {
    pub fn new(
        key: impl Into<String>,
        policy: RefreshPolicy,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            key: key.into(),
            policy,
            store,
            clock,
            utc_offset: Utc.fix(),
        }
    }

    /// Offset whose calendar decides when a daily policy rolls over.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read refresh state '{}': {}", self.key, e);
                return None;
            }
        };

        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(at) => Some(at.with_timezone(&Utc)),
            Err(e) => {
                warn!(
                    "Ignoring unreadable refresh timestamp '{}' for '{}': {}",
                    raw, self.key, e
                );
                None
            }
        }
    }

    pub fn is_stale(&self) -> bool {
        let stale = self
            .policy
            .is_stale(self.last_refreshed(), self.clock.now(), self.utc_offset);
        debug!("Refresh gate '{}' ({}): stale={}", self.key, self.policy, stale);
        stale
    }

    /// Stamp the dataset as refreshed now and persist the timestamp.
    pub fn mark_refreshed(&self) -> Result<DateTime<Utc>> {
        let now = self.clock.now();
        self.store.set(&self.key, &now.to_rfc3339())?;
        Ok(now)
    }

    /// Forget the timestamp so the next check reports stale.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::storage::InMemoryStore;
    use crate::utils::time_utils::ManualClock;
    use chrono::{Duration, TimeZone};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Storage("disk unavailable".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("disk unavailable".into()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(Error::Storage("disk unavailable".into()))
        }
    }

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 10, 14, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn test_daily_lifecycle() {
        let clock = clock();
        let gate = RefreshGate::new(
            "last_market_data_refresh",
            RefreshPolicy::Daily,
            Arc::new(InMemoryStore::new()),
            clock.clone(),
        );

        assert!(gate.is_stale());
        gate.mark_refreshed().unwrap();
        assert!(!gate.is_stale());

        clock.advance(Duration::hours(9)); // 23:00 same day
        assert!(!gate.is_stale());

        clock.advance(Duration::hours(2)); // past midnight
        assert!(gate.is_stale());
    }

    #[test]
    fn test_interval_lifecycle() {
        let clock = clock();
        let gate = RefreshGate::new(
            "last_recommendations_refresh",
            RefreshPolicy::interval(5),
            Arc::new(InMemoryStore::new()),
            clock.clone(),
        );

        gate.mark_refreshed().unwrap();
        clock.advance(Duration::seconds(4 * 60 + 59));
        assert!(!gate.is_stale());
        clock.advance(Duration::seconds(1));
        assert!(gate.is_stale());
    }

    #[test]
    fn test_clock_moving_backwards_is_stale() {
        let clock = clock();
        let gate = RefreshGate::new(
            "last_recommendations_refresh",
            RefreshPolicy::interval(5),
            Arc::new(InMemoryStore::new()),
            clock.clone(),
        );

        gate.mark_refreshed().unwrap();
        clock.advance(Duration::hours(-2));
        assert!(gate.is_stale());
    }

    #[test]
    fn test_clear_forces_stale() {
        let gate = RefreshGate::new(
            "k",
            RefreshPolicy::Daily,
            Arc::new(InMemoryStore::new()),
            clock(),
        );
        gate.mark_refreshed().unwrap();
        gate.clear().unwrap();
        assert!(gate.is_stale());
        assert!(gate.last_refreshed().is_none());
    }

    #[test]
    fn test_unreadable_state_is_stale() {
        let store = Arc::new(InMemoryStore::new());
        store.set("k", "yesterday-ish").unwrap();
        let gate = RefreshGate::new("k", RefreshPolicy::Daily, store, clock());
        assert!(gate.is_stale());

        let broken = RefreshGate::new("k", RefreshPolicy::Daily, Arc::new(BrokenStore), clock());
        assert!(broken.is_stale());
        assert!(broken.mark_refreshed().is_err());
    }

    #[test]
    fn test_gates_are_independent() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        let clock = clock();
        let market = RefreshGate::new("last_market_data_refresh", RefreshPolicy::Daily, store.clone(), clock.clone());
        let news = RefreshGate::new("last_news_data_refresh", RefreshPolicy::Daily, store, clock);

        market.mark_refreshed().unwrap();
        assert!(!market.is_stale());
        assert!(news.is_stale());
    }
}
