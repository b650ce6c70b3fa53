//! MarketPulse Core - Dashboard datasets, caching and refresh policy.
//!
//! This crate decides when each dashboard dataset is refreshed, keeps the
//! last good copy of it, and turns quotes from the `market-data` crate into
//! recommendations, index levels, a chart series and a news digest.
//! Refresh timestamps are persisted through the [`storage::KeyValueStore`]
//! trait.

pub mod cache;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod market;
pub mod news;
pub mod quotes;
pub mod recommendations;
pub mod refresh;
pub mod storage;
pub mod utils;

pub use dashboard::{DashboardConfig, DashboardService, DashboardServiceTrait, ResourceStatus};
pub use market::{ChartPoint, MarketIndex};
pub use news::{NewsArticle, NewsCategory};
pub use recommendations::{RecommendationKind, RecommendationSet, StockRecommendation};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
