use chrono::{Datelike, FixedOffset, NaiveDate, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{NewsArticle, NewsCategory};

struct CatalogEntry {
    id: &'static str,
    title: &'static str,
    summary: &'static str,
    source: &'static str,
    image_url: Option<&'static str>,
    category: NewsCategory,
    tickers: &'static [&'static str],
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "1",
        title: "Fed Chair Powell Signals Patience on Rate Cuts",
        summary: "Federal Reserve Chairman Jerome Powell indicated the central bank will take a patient approach to cutting interest rates, citing continued strong economic data.",
        source: "Financial Times",
        image_url: None,
        category: NewsCategory::Economy,
        tickers: &["SPY", "QQQ", "DIA"],
    },
    CatalogEntry {
        id: "2",
        title: "Retail Giants Report Mixed Earnings",
        summary: "Major retailers showed mixed results this quarter, with some exceeding expectations while others struggled with inventory management and changing consumer spending habits.",
        source: "Wall Street Journal",
        image_url: None,
        category: NewsCategory::Stocks,
        tickers: &["WMT", "TGT", "COST"],
    },
    CatalogEntry {
        id: "3",
        title: "Tech Stocks Continue Rally on AI Optimism",
        summary: "Technology shares extended their rally as investors remain optimistic about artificial intelligence applications and their potential to drive future earnings.",
        source: "Bloomberg",
        image_url: Some("https://images.unsplash.com/photo-1526374965328-7f61d4dc18c5?w=800&auto=format&fit=crop&q=60&ixlib=rb-4.0.3"),
        category: NewsCategory::Stocks,
        tickers: &["AAPL", "MSFT", "NVDA", "GOOGL"],
    },
    CatalogEntry {
        id: "4",
        title: "Oil Prices Decline on Supply Concerns",
        summary: "Crude oil prices dropped as OPEC+ members discuss potential increases in production quotas, while global demand forecasts remain uncertain.",
        source: "Reuters",
        image_url: None,
        category: NewsCategory::Markets,
        tickers: &["XOM", "CVX", "USO"],
    },
    CatalogEntry {
        id: "5",
        title: "ETF Inflows Hit Record High",
        summary: "Exchange-traded funds saw record inflows last month as retail investors continue to favor passive investment vehicles for market exposure.",
        source: "Investor's Business Daily",
        image_url: None,
        category: NewsCategory::Investing,
        tickers: &["SPY", "VOO", "VTI"],
    },
];

/// First and last publishing hour, local time.
const PUBLISH_HOURS: std::ops::RangeInclusive<u32> = 6..=17;

/// The digest for `as_of`, each article published during the local trading day.
///
/// Publish times are seeded by the date, so regenerating on the same day
/// gives the same digest.
pub fn generate_digest(as_of: NaiveDate, offset: FixedOffset) -> Vec<NewsArticle> {
    let mut rng = StdRng::seed_from_u64(as_of.num_days_from_ce() as u64);

    CATALOG
        .iter()
        .map(|entry| {
            let hour = rng.gen_range(PUBLISH_HOURS);
            let minute = rng.gen_range(0..60);
            let published_at = as_of
                .and_hms_opt(hour, minute, 0)
                .and_then(|local| offset.from_local_datetime(&local).single())
                .map(|local| local.with_timezone(&Utc))
                .unwrap_or_else(|| as_of.and_time(chrono::NaiveTime::MIN).and_utc());

            NewsArticle {
                id: entry.id.to_string(),
                title: entry.title.to_string(),
                summary: entry.summary.to_string(),
                source: entry.source.to_string(),
                url: "#".to_string(),
                image_url: entry.image_url.map(str::to_string),
                published_at,
                category: entry.category,
                tickers: entry.tickers.iter().map(|t| t.to_string()).collect(),
            }
        })
        .collect()
}

/// Articles mentioning any of `tickers`; an empty list keeps everything.
pub fn filter_news_by_tickers(news: &[NewsArticle], tickers: &[String]) -> Vec<NewsArticle> {
    if tickers.is_empty() {
        return news.to_vec();
    }
    news.iter()
        .filter(|article| {
            article
                .tickers
                .iter()
                .any(|t| tickers.iter().any(|wanted| wanted.eq_ignore_ascii_case(t)))
        })
        .cloned()
        .collect()
}

/// Articles in `category`; `None` keeps everything.
pub fn filter_news_by_category(
    news: &[NewsArticle],
    category: Option<NewsCategory>,
) -> Vec<NewsArticle> {
    match category {
        Some(category) => news
            .iter()
            .filter(|article| article.category == category)
            .cloned()
            .collect(),
        None => news.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_digest_published_during_the_day() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let digest = generate_digest(day(), offset);

        assert_eq!(digest.len(), 5);
        for article in &digest {
            let local = article.published_at.with_timezone(&offset);
            assert_eq!(local.date_naive(), day());
            assert!((6..=17).contains(&local.hour()));
        }
        assert!(digest[2].image_url.is_some());
        assert!(digest.iter().all(|a| a.url == "#"));
    }

    #[test]
    fn test_digest_stable_within_a_day() {
        let offset = FixedOffset::east_opt(0).unwrap();
        assert_eq!(generate_digest(day(), offset), generate_digest(day(), offset));
    }

    #[test]
    fn test_filter_by_tickers() {
        let digest = generate_digest(day(), FixedOffset::east_opt(0).unwrap());

        assert_eq!(filter_news_by_tickers(&digest, &[]).len(), 5);

        let spy = filter_news_by_tickers(&digest, &["spy".to_string()]);
        let ids: Vec<_> = spy.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5"]);

        let none = filter_news_by_tickers(&digest, &["TSLA".to_string()]);
        assert!(none.is_empty());
    }

    #[test]
    fn test_filter_by_category() {
        let digest = generate_digest(day(), FixedOffset::east_opt(0).unwrap());

        assert_eq!(filter_news_by_category(&digest, None).len(), 5);
        let stocks = filter_news_by_category(&digest, Some(NewsCategory::Stocks));
        assert_eq!(stocks.len(), 2);
        assert!(stocks.iter().all(|a| a.category == NewsCategory::Stocks));
    }
}
