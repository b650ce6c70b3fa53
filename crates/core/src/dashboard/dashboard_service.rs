use std::sync::Arc;

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate};
use futures::future::join_all;
use log::{debug, info, warn};

use crate::cache::{CachedResource, QuoteCache};
use crate::constants::{MARKET_DATA_REFRESH_KEY, NEWS_REFRESH_KEY, RECOMMENDATIONS_REFRESH_KEY};
use crate::errors::{Error, Result};
use crate::market::{synthesize, ChartPoint, IndexLevels, MarketIndex, MARKET_INDICES};
use crate::news::{generate_digest, NewsArticle};
use crate::quotes::QuoteClient;
use crate::recommendations::{
    RecommendationGenerator, RecommendationKind, RecommendationSet, BUY_LIST, SELL_LIST,
};
use crate::refresh::{RefreshGate, RefreshPolicy};
use crate::storage::KeyValueStore;
use crate::utils::time_utils::{local_date, Clock};

use super::dashboard_config::DashboardConfig;
use super::dashboard_traits::{DashboardServiceTrait, ResourceStatus};

/// Caches and refreshes every dashboard dataset.
pub struct DashboardService {
    client: Arc<dyn QuoteClient>,
    clock: Arc<dyn Clock>,
    utc_offset: FixedOffset,
    generator: RecommendationGenerator,
    recommendations: CachedResource<RecommendationSet>,
    indices: CachedResource<Vec<MarketIndex>>,
    news: CachedResource<Vec<NewsArticle>>,
}

impl DashboardService {
    pub fn new(
        config: &DashboardConfig,
        client: Arc<dyn QuoteClient>,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let offset = config.utc_offset;
        let gate = |key: &str, policy: RefreshPolicy| {
            RefreshGate::new(key, policy, store.clone(), clock.clone()).with_utc_offset(offset)
        };

        let recommendations = CachedResource::new(
            "recommendations",
            QuoteCache::new(gate(RECOMMENDATIONS_REFRESH_KEY, config.recommendations_refresh)),
        );
        let indices = CachedResource::new(
            "market_indices",
            QuoteCache::new(gate(MARKET_DATA_REFRESH_KEY, config.market_refresh)),
        );
        let news = CachedResource::new(
            "news",
            QuoteCache::new(gate(NEWS_REFRESH_KEY, config.news_refresh)),
        );

        info!(
            "Dashboard initialized: recommendations {}, market {}, news {}",
            config.recommendations_refresh, config.market_refresh, config.news_refresh
        );

        Self {
            generator: RecommendationGenerator::new(client.clone(), clock.clone())
                .with_utc_offset(offset),
            client,
            clock,
            utc_offset: offset,
            recommendations,
            indices,
            news,
        }
    }

    fn today(&self) -> NaiveDate {
        local_date(self.clock.now(), self.utc_offset)
    }

    async fn fetch_recommendations(&self) -> Result<RecommendationSet> {
        let buy = self.generator.generate(BUY_LIST, RecommendationKind::Buy).await;
        let sell = self.generator.generate(SELL_LIST, RecommendationKind::Sell).await;
        let set = RecommendationSet { buy, sell };

        if set.is_empty() {
            return Err(Error::Unexpected(
                "no recommendation could be priced".to_string(),
            ));
        }
        Ok(set)
    }

    async fn fetch_indices(&self) -> Result<Vec<MarketIndex>> {
        let as_of = self.today();
        let quotes = join_all(
            MARKET_INDICES
                .iter()
                .map(|index| self.client.quote(index.symbol, as_of)),
        )
        .await;

        MARKET_INDICES
            .iter()
            .zip(quotes)
            .map(|(descriptor, quote)| -> Result<MarketIndex> {
                let quote = quote?;
                debug!("{} at {:.2} from {}", descriptor.symbol, quote.price, quote.source);
                Ok(MarketIndex::from_quote(descriptor, &quote))
            })
            .collect()
    }

    async fn status_of<T: Clone + Default + Send + Sync>(
        resource: &CachedResource<T>,
    ) -> ResourceStatus {
        let gate = resource.cache().gate();
        ResourceStatus {
            name: resource.name().to_string(),
            policy: gate.policy().to_string(),
            last_refreshed: gate.last_refreshed(),
            cached: resource.peek().await.is_some(),
            stale: resource.is_stale().await,
        }
    }
}

#[async_trait]
impl DashboardServiceTrait for DashboardService {
    async fn get_recommendations(&self, force: bool) -> RecommendationSet {
        self.recommendations
            .get_or_refresh(force, || self.fetch_recommendations())
            .await
    }

    async fn get_market_indices(&self, force: bool) -> Vec<MarketIndex> {
        self.indices
            .get_or_refresh(force, || self.fetch_indices())
            .await
    }

    async fn get_chart_series(&self) -> Vec<ChartPoint> {
        let indices = self.get_market_indices(false).await;
        match IndexLevels::from_indices(&indices) {
            Some(levels) => synthesize(&levels, self.today()),
            None => {
                warn!("Index levels unavailable, chart left empty");
                Vec::new()
            }
        }
    }

    async fn get_news(&self, force: bool) -> Vec<NewsArticle> {
        let today = self.today();
        let offset = self.utc_offset;
        self.news
            .get_or_refresh(force, || async move { Ok(generate_digest(today, offset)) })
            .await
    }

    async fn warm_up(&self) {
        let recommendations = self.get_recommendations(false).await;
        let indices = self.get_market_indices(false).await;
        let news = self.get_news(false).await;
        debug!(
            "Warm-up done: {} recommendations, {} indices, {} articles",
            recommendations.len(),
            indices.len(),
            news.len()
        );
    }

    async fn resource_status(&self) -> Vec<ResourceStatus> {
        vec![
            Self::status_of(&self.recommendations).await,
            Self::status_of(&self.indices).await,
            Self::status_of(&self.news).await,
        ]
    }
}
