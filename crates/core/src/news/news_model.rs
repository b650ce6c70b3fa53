use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Markets,
    Stocks,
    Investing,
    Economy,
}

impl NewsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Markets => "markets",
            NewsCategory::Stocks => "stocks",
            NewsCategory::Investing => "investing",
            NewsCategory::Economy => "economy",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markets" => Ok(NewsCategory::Markets),
            "stocks" => Ok(NewsCategory::Stocks),
            "investing" => Ok(NewsCategory::Investing),
            "economy" => Ok(NewsCategory::Economy),
            other => Err(Error::InvalidConfigValue(format!(
                "unknown news category '{}'",
                other
            ))),
        }
    }
}

/// A news item in the digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub category: NewsCategory,
    #[serde(default)]
    pub tickers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("Stocks".parse::<NewsCategory>().unwrap(), NewsCategory::Stocks);
        assert_eq!(" economy ".parse::<NewsCategory>().unwrap(), NewsCategory::Economy);
        assert!("crypto".parse::<NewsCategory>().is_err());
    }

    #[test]
    fn test_category_round_trips_as_str() {
        for category in [
            NewsCategory::Markets,
            NewsCategory::Stocks,
            NewsCategory::Investing,
            NewsCategory::Economy,
        ] {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }
}
