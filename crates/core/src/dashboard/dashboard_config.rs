use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};

use marketpulse_market_data::{default_relays, RelayEndpoint, DEFAULT_RELAY_TIMEOUT};

use crate::constants::{DEFAULT_MARKET_REFRESH_MINUTES, DEFAULT_PACING_DELAY_MS};
use crate::refresh::RefreshPolicy;

/// Everything the dashboard needs to build its quote chain and caches.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Enables Alpha Vantage when set
    pub alpha_vantage_api_key: Option<String>,

    /// Enables Finnhub when set
    pub finnhub_api_key: Option<String>,

    /// Yahoo needs no key; this turns it off
    pub yahoo_enabled: bool,

    /// Relay endpoints, tried in order
    pub relays: Vec<RelayEndpoint>,

    /// Budget for a single relay attempt
    pub relay_timeout: Duration,

    pub market_refresh: RefreshPolicy,
    pub recommendations_refresh: RefreshPolicy,
    pub news_refresh: RefreshPolicy,

    /// Offset used for "today" in daily policies and stamped dates
    pub utc_offset: FixedOffset,

    /// Gap between sequential quote calls under a strict quota
    pub pacing_delay: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_api_key: None,
            finnhub_api_key: None,
            yahoo_enabled: true,
            relays: default_relays(),
            relay_timeout: DEFAULT_RELAY_TIMEOUT,
            market_refresh: RefreshPolicy::interval(DEFAULT_MARKET_REFRESH_MINUTES),
            recommendations_refresh: RefreshPolicy::interval(DEFAULT_MARKET_REFRESH_MINUTES),
            news_refresh: RefreshPolicy::Daily,
            utc_offset: Utc.fix(),
            pacing_delay: Duration::from_millis(DEFAULT_PACING_DELAY_MS),
        }
    }
}
