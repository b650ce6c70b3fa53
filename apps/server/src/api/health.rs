use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use marketpulse_core::ResourceStatus;
use marketpulse_market_data::CircuitMetrics;
use serde::Serialize;

use crate::main_lib::AppState;

pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    started_at: DateTime<Utc>,
    state_path: String,
    providers: Vec<CircuitMetrics>,
    datasets: Vec<ResourceStatus>,
}

/// Provider circuits and dataset freshness.
async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        started_at: state.started_at,
        state_path: state.state_path.clone(),
        providers: state.market_data.circuit_metrics(),
        datasets: state.dashboard.resource_status().await,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/status", get(get_status))
}
