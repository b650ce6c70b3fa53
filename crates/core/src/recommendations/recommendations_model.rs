use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Buy,
    Sell,
    Hold,
}

/// Where a recommendation is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSource {
    pub name: String,
    pub url: String,
}

/// One recommendation as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecommendation {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub recommendation: RecommendationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_retail_favorite: Option<bool>,
    #[serde(default)]
    pub sources: Vec<RecommendationSource>,
}

/// The two lists shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub buy: Vec<StockRecommendation>,
    pub sell: Vec<StockRecommendation>,
}

impl RecommendationSet {
    pub fn is_empty(&self) -> bool {
        self.buy.is_empty() && self.sell.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buy.len() + self.sell.len()
    }
}

/// A stock on one of the curated lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuratedStock {
    pub symbol: &'static str,
    pub name: &'static str,
    pub is_retail_favorite: bool,
    pub analysis: &'static str,
}
