use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::market::{ChartPoint, MarketIndex};
use crate::news::NewsArticle;
use crate::recommendations::RecommendationSet;

/// Freshness of one cached dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
    pub name: String,
    pub policy: String,
    pub last_refreshed: Option<DateTime<Utc>>,
    pub cached: bool,
    pub stale: bool,
}

/// Consumer operations of the dashboard.
#[async_trait]
pub trait DashboardServiceTrait: Send + Sync {
    /// Buy and sell lists; `force` refreshes regardless of freshness.
    async fn get_recommendations(&self, force: bool) -> RecommendationSet;

    /// S&P 500, NASDAQ and Dow Jones levels.
    async fn get_market_indices(&self, force: bool) -> Vec<MarketIndex>;

    /// Twelve monthly points ending at the current index levels.
    ///
    /// Empty when the index levels are unavailable.
    async fn get_chart_series(&self) -> Vec<ChartPoint>;

    /// Today's news digest.
    async fn get_news(&self, force: bool) -> Vec<NewsArticle>;

    /// Refreshes every stale dataset.
    async fn warm_up(&self);

    /// Freshness of every dataset.
    async fn resource_status(&self) -> Vec<ResourceStatus>;
}
