//! Quote access for the dashboard.
//!
//! - [`QuoteClient`] - the seam the recommendation and index code fetch through
//! - [`MarketDataClient`] - facade over the market-data crate's `QuoteFetcher`
//! - [`BatchPacing`] - how a batch of symbols should be fetched
//!
//! ```text
//! DashboardService → QuoteClient (MarketDataClient) → QuoteFetcher → providers / relays / synthetic
//! ```

pub mod client;

pub use client::{BatchPacing, MarketDataClient, QuoteClient};

pub use marketpulse_market_data::Quote;
