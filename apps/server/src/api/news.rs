use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use marketpulse_core::news::{filter_news_by_category, filter_news_by_tickers};
use marketpulse_core::{NewsArticle, NewsCategory};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(serde::Deserialize)]
struct NewsQuery {
    #[serde(default)]
    refresh: bool,
    category: Option<String>,
    /// Comma-separated tickers
    tickers: Option<String>,
}

async fn get_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> ApiResult<Json<Vec<NewsArticle>>> {
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(str::parse::<NewsCategory>)
        .transpose()?;
    let tickers: Vec<String> = query
        .tickers
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect();

    let news = state.dashboard.get_news(query.refresh).await;
    let news = filter_news_by_tickers(&news, &tickers);
    Ok(Json(filter_news_by_category(&news, category)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/news", get(get_news))
}
