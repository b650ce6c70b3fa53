//! Daily news digest for retail investors.
//!
//! - [`news_model`] - article and category types
//! - [`digest`] - the article catalog, daily generation and filters

pub mod digest;
pub mod news_model;

pub use digest::{filter_news_by_category, filter_news_by_tickers, generate_digest};
pub use news_model::{NewsArticle, NewsCategory};
