use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use marketpulse_core::{ChartPoint, MarketIndex};

use crate::{api::RefreshQuery, main_lib::AppState};

async fn get_market_indices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RefreshQuery>,
) -> Json<Vec<MarketIndex>> {
    Json(state.dashboard.get_market_indices(query.refresh).await)
}

async fn get_chart_series(State(state): State<Arc<AppState>>) -> Json<Vec<ChartPoint>> {
    Json(state.dashboard.get_chart_series().await)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/market/indices", get(get_market_indices))
        .route("/market/chart", get(get_chart_series))
}
