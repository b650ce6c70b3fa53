//! Buy/sell recommendations.
//!
//! - [`recommendations_model`] - recommendation records and curated inputs
//! - [`curated`] - the curated buy and sell lists
//! - [`sources`] - the attribution catalog and source selection
//! - [`recommendation_generator`] - quotes + curated list → recommendations

pub mod curated;
pub mod recommendation_generator;
pub mod recommendations_model;
pub mod sources;

pub use curated::{BUY_LIST, SELL_LIST};
pub use recommendation_generator::{filter_recommendations_by_date, RecommendationGenerator};
pub use recommendations_model::{
    CuratedStock, RecommendationKind, RecommendationSet, RecommendationSource, StockRecommendation,
};
pub use sources::{select_sources, SourceTier};
