use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use marketpulse_core::{
    quotes::MarketDataClient,
    storage::FileStore,
    utils::time_utils::SystemClock,
    DashboardService, DashboardServiceTrait,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat};

pub struct AppState {
    pub dashboard: Arc<dyn DashboardServiceTrait>,
    /// Kept beside the dashboard for provider health reporting.
    pub market_data: Arc<MarketDataClient>,
    pub state_path: String,
    pub started_at: DateTime<Utc>,
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    if let Some(parent) = config.state_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory {}", parent.display())
            })?;
        }
    }
    let store = Arc::new(FileStore::new(config.state_path.clone()));

    let market_data = Arc::new(MarketDataClient::new(&config.dashboard));
    let dashboard = Arc::new(DashboardService::new(
        &config.dashboard,
        market_data.clone(),
        store,
        Arc::new(SystemClock),
    ));

    tracing::info!(
        "Dashboard state persisted at {}",
        config.state_path.display()
    );

    Ok(Arc::new(AppState {
        dashboard,
        market_data,
        state_path: config.state_path.display().to_string(),
        started_at: Utc::now(),
    }))
}
