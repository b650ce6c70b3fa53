use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::{anyhow, Context};
use marketpulse_core::{refresh::RefreshPolicy, utils::time_utils::parse_utc_offset, DashboardConfig};
use marketpulse_market_data::RelayEndpoint;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(anyhow!("Invalid MP_LOG_FORMAT: expected 'text' or 'json', got '{}'", s)),
        }
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub state_path: PathBuf,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Zero disables the warm-up scheduler
    pub warmup_interval: Duration,
    pub log_format: LogFormat,
    pub dashboard: DashboardConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            state_path: PathBuf::from("./data/state.json"),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            warmup_interval: Duration::from_secs(60),
            log_format: LogFormat::Text,
            dashboard: DashboardConfig::default(),
        }
    }
}

impl Config {
    /// Reads `MP_*` variables, after loading a `.env` file when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any variable source; unset keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string());

        if let Some(addr) = var("MP_LISTEN_ADDR") {
            config.listen_addr = addr.parse().context("Invalid MP_LISTEN_ADDR")?;
        }
        if let Some(path) = var("MP_STATE_PATH") {
            config.state_path = PathBuf::from(path);
        }
        if let Some(origins) = var("MP_CORS_ALLOW_ORIGINS") {
            config.cors_allow = split_list(&origins);
        }
        if let Some(ms) = var("MP_REQUEST_TIMEOUT_MS") {
            config.request_timeout =
                Duration::from_millis(ms.parse().context("Invalid MP_REQUEST_TIMEOUT_MS")?);
        }
        if let Some(secs) = var("MP_WARMUP_INTERVAL_SECS") {
            config.warmup_interval =
                Duration::from_secs(secs.parse().context("Invalid MP_WARMUP_INTERVAL_SECS")?);
        }
        if let Some(format) = var("MP_LOG_FORMAT") {
            config.log_format = format.parse()?;
        }

        let dashboard = &mut config.dashboard;
        dashboard.alpha_vantage_api_key = var("MP_ALPHA_VANTAGE_API_KEY").filter(|k| !k.is_empty());
        dashboard.finnhub_api_key = var("MP_FINNHUB_API_KEY").filter(|k| !k.is_empty());
        if let Some(enabled) = var("MP_YAHOO_ENABLED") {
            dashboard.yahoo_enabled = parse_bool(&enabled)
                .ok_or_else(|| anyhow!("Invalid MP_YAHOO_ENABLED: {}", enabled))?;
        }
        if let Some(relays) = var("MP_RELAYS") {
            dashboard.relays = split_list(&relays)
                .iter()
                .map(|template| RelayEndpoint::from_template(template))
                .collect();
        }
        if let Some(secs) = var("MP_RELAY_TIMEOUT_SECS") {
            dashboard.relay_timeout =
                Duration::from_secs(secs.parse().context("Invalid MP_RELAY_TIMEOUT_SECS")?);
        }
        if let Some(minutes) = var("MP_MARKET_REFRESH_MINUTES") {
            let policy: RefreshPolicy = minutes.parse()?;
            dashboard.market_refresh = policy;
            dashboard.recommendations_refresh = policy;
        }
        if let Some(policy) = var("MP_NEWS_REFRESH") {
            dashboard.news_refresh = policy.parse()?;
        }
        if let Some(offset) = var("MP_UTC_OFFSET") {
            dashboard.utc_offset =
                parse_utc_offset(&offset).ok_or_else(|| anyhow!("Invalid MP_UTC_OFFSET: {}", offset))?;
        }
        if let Some(ms) = var("MP_PACING_DELAY_MS") {
            dashboard.pacing_delay =
                Duration::from_millis(ms.parse().context("Invalid MP_PACING_DELAY_MS")?);
        }

        Ok(config)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr.port(), 8080);
        assert!(config.dashboard.yahoo_enabled);
        assert_eq!(config.dashboard.relays.len(), 3);
        assert_eq!(config.dashboard.news_refresh, RefreshPolicy::Daily);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn reads_log_format() {
        assert_eq!(
            config_from(&[("MP_LOG_FORMAT", "JSON")]).unwrap().log_format,
            LogFormat::Json
        );
        assert_eq!(
            config_from(&[("MP_LOG_FORMAT", "text")]).unwrap().log_format,
            LogFormat::Text
        );
        assert!(config_from(&[("MP_LOG_FORMAT", "jsonl")]).is_err());
    }

    #[test]
    fn reads_provider_and_refresh_settings() {
        let config = config_from(&[
            ("MP_ALPHA_VANTAGE_API_KEY", "demo"),
            ("MP_FINNHUB_API_KEY", " "),
            ("MP_YAHOO_ENABLED", "false"),
            ("MP_RELAYS", "https://relay.one/?{url}, https://relay.two/raw?u={url}"),
            ("MP_MARKET_REFRESH_MINUTES", "15"),
            ("MP_NEWS_REFRESH", "60"),
            ("MP_UTC_OFFSET", "-05:00"),
        ])
        .unwrap();

        let dashboard = &config.dashboard;
        assert_eq!(dashboard.alpha_vantage_api_key.as_deref(), Some("demo"));
        assert!(dashboard.finnhub_api_key.is_none());
        assert!(!dashboard.yahoo_enabled);
        assert_eq!(dashboard.relays.len(), 2);
        assert_eq!(dashboard.relays[0].name, "relay.one");
        assert_eq!(dashboard.market_refresh, RefreshPolicy::interval(15));
        assert_eq!(dashboard.recommendations_refresh, RefreshPolicy::interval(15));
        assert_eq!(dashboard.news_refresh, RefreshPolicy::interval(60));
        assert_eq!(dashboard.utc_offset.local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config_from(&[("MP_LISTEN_ADDR", "nowhere")]).is_err());
        assert!(config_from(&[("MP_MARKET_REFRESH_MINUTES", "0")]).is_err());
        assert!(config_from(&[("MP_YAHOO_ENABLED", "maybe")]).is_err());
        assert!(config_from(&[("MP_UTC_OFFSET", "+25:00")]).is_err());
    }
}
