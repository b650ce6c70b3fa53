/// Persisted refresh timestamp for the market indices.
pub const MARKET_DATA_REFRESH_KEY: &str = "last_market_data_refresh";

/// Persisted refresh timestamp for the recommendation lists.
pub const RECOMMENDATIONS_REFRESH_KEY: &str = "last_recommendations_refresh";

/// Persisted refresh timestamp for the news digest.
pub const NEWS_REFRESH_KEY: &str = "last_news_data_refresh";

/// Minutes between market index refreshes.
pub const DEFAULT_MARKET_REFRESH_MINUTES: u32 = 5;

/// Pause between quote calls when the primary provider enforces a strict quota.
pub const DEFAULT_PACING_DELAY_MS: u64 = 1_000;

/// Months in the synthesized index chart.
pub const CHART_MONTHS: u32 = 12;
