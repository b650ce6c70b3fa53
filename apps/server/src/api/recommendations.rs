use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use marketpulse_core::recommendations::filter_recommendations_by_date;
use marketpulse_core::RecommendationSet;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(serde::Deserialize)]
struct RecommendationsQuery {
    #[serde(default)]
    refresh: bool,
    date: Option<String>,
}

async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecommendationsQuery>,
) -> ApiResult<Json<RecommendationSet>> {
    let date = query
        .date
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| {
            NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| {
                ApiError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", d))
            })
        })
        .transpose()?;

    let set = state.dashboard.get_recommendations(query.refresh).await;
    Ok(Json(RecommendationSet {
        buy: filter_recommendations_by_date(&set.buy, date),
        sell: filter_recommendations_by_date(&set.sell, date),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/recommendations", get(get_recommendations))
}
