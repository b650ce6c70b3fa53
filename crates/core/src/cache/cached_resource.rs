use std::future::Future;

use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::errors::Result;

use super::{CachedDataset, QuoteCache};

/// A named dataset refreshed on demand.
///
/// Concurrent callers that find the dataset stale queue on one refresh lock;
/// whoever gets it first fetches, the rest reuse that result.
pub struct CachedResource<T> {
    name: &'static str,
    cache: QuoteCache<T>,
    refresh_lock: Mutex<()>,
}

impl<T: Clone + Default + Send + Sync> CachedResource<T> {
    pub fn new(name: &'static str, cache: QuoteCache<T>) -> Self {
        Self {
            name,
            cache,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn cache(&self) -> &QuoteCache<T> {
        &self.cache
    }

    pub async fn peek(&self) -> Option<CachedDataset<T>> {
        self.cache.get().await
    }

    pub async fn is_stale(&self) -> bool {
        self.cache.is_stale().await
    }

    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }

    /// Cached dataset when fresh, otherwise the result of `fetch`.
    ///
    /// `force` skips the freshness check but still joins a refresh that is
    /// already running. A failed fetch serves the previous dataset, or
    /// `T::default()` when there is none.
    pub async fn get_or_refresh<F, Fut>(&self, force: bool, fetch: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if !force {
            if let Some(data) = self.fresh().await {
                return data;
            }
        }

        let seen = self.cache.generation().await;
        let _guard = self.refresh_lock.lock().await;

        // Someone refreshed while we waited.
        if self.cache.generation().await != seen {
            if let Some(dataset) = self.cache.get().await {
                debug!("{}: reusing refresh completed by another caller", self.name);
                return dataset.data;
            }
        }
        if !force {
            if let Some(data) = self.fresh().await {
                return data;
            }
        }

        info!("{}: refreshing{}", self.name, if force { " (forced)" } else { "" });
        match fetch().await {
            Ok(data) => {
                self.cache.set(data.clone()).await;
                data
            }
            Err(e) => {
                warn!("{}: refresh failed, serving previous data: {}", self.name, e);
                self.cache
                    .get()
                    .await
                    .map(|dataset| dataset.data)
                    .unwrap_or_default()
            }
        }
    }

    async fn fresh(&self) -> Option<T> {
        if self.cache.is_stale().await {
            return None;
        }
        self.cache.get().await.map(|dataset| dataset.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::refresh::{RefreshGate, RefreshPolicy};
    use crate::storage::InMemoryStore;
    use crate::utils::time_utils::ManualClock;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn resource(clock: Arc<ManualClock>) -> CachedResource<Vec<String>> {
        let gate = RefreshGate::new(
            "last_news_data_refresh",
            RefreshPolicy::interval(5),
            Arc::new(InMemoryStore::new()),
            clock,
        );
        CachedResource::new("news", QuoteCache::new(gate))
    }

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_fresh_dataset_is_reused() {
        let clock = clock();
        let resource = resource(clock.clone());
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let data = resource
                .get_or_refresh(false, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec!["a".to_string()])
                })
                .await;
            assert_eq!(data, vec!["a".to_string()]);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        clock.advance(Duration::minutes(6));
        resource
            .get_or_refresh(false, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec!["b".to_string()])
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_force_refetches() {
        let resource = resource(clock());
        resource.get_or_refresh(false, || async { Ok(vec!["old".to_string()]) }).await;
        let data = resource
            .get_or_refresh(true, || async { Ok(vec!["new".to_string()]) })
            .await;
        assert_eq!(data, vec!["new".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_refresh_serves_previous() {
        let clock = clock();
        let resource = resource(clock.clone());

        let empty = resource
            .get_or_refresh(false, || async { Err(Error::Unexpected("offline".into())) })
            .await;
        assert!(empty.is_empty());

        resource.get_or_refresh(false, || async { Ok(vec!["kept".to_string()]) }).await;
        clock.advance(Duration::minutes(10));
        let data = resource
            .get_or_refresh(false, || async { Err(Error::Unexpected("offline".into())) })
            .await;
        assert_eq!(data, vec!["kept".to_string()]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_refreshes_coalesce() {
        let resource = Arc::new(resource(clock()));
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let resource = resource.clone();
                let calls = calls.clone();
                tokio::spawn(async move {
                    resource
                        .get_or_refresh(false, || async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                            Ok(vec!["once".to_string()])
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), vec!["once".to_string()]);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate() {
        let resource = resource(clock());
        resource.get_or_refresh(false, || async { Ok(vec!["x".to_string()]) }).await;
        assert!(!resource.is_stale().await);
        resource.invalidate().await;
        assert!(resource.is_stale().await);
        assert!(resource.peek().await.is_none());
    }
}
