//! Market indices and the twelve-month index chart.

pub mod chart;
pub mod market_model;

pub use chart::synthesize;
pub use market_model::{ChartPoint, IndexDescriptor, IndexLevels, MarketIndex, MARKET_INDICES};
