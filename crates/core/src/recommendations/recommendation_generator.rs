use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use futures::future::join_all;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::Result;
use crate::quotes::{BatchPacing, Quote, QuoteClient};
use crate::utils::time_utils::{local_date, Clock};

use super::sources::select_sources;
use super::{CuratedStock, RecommendationKind, StockRecommendation};

/// Turns a curated list into priced recommendations.
pub struct RecommendationGenerator {
    client: Arc<dyn QuoteClient>,
    clock: Arc<dyn Clock>,
    utc_offset: FixedOffset,
}

impl RecommendationGenerator {
    pub fn new(client: Arc<dyn QuoteClient>, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            clock,
            utc_offset: Utc.fix(),
        }
    }

    /// Offset whose calendar date is stamped on recommendations.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// One recommendation per stock whose quote could be fetched.
    ///
    /// Stocks whose quote fails are logged and left out; the batch always
    /// completes.
    pub async fn generate(
        &self,
        stocks: &[CuratedStock],
        kind: RecommendationKind,
    ) -> Vec<StockRecommendation> {
        let date = local_date(self.clock.now(), self.utc_offset);
        let quotes = self.fetch_quotes(stocks, date).await;
        let mut rng = StdRng::from_entropy();

        let recommendations: Vec<StockRecommendation> = stocks
            .iter()
            .zip(quotes)
            .filter_map(|(stock, quote)| match quote {
                Ok(quote) => Some(build_recommendation(stock, &quote, kind, date, &mut rng)),
                Err(e) => {
                    warn!("Skipping {} recommendation for {}: {}", kind_label(kind), stock.symbol, e);
                    None
                }
            })
            .collect();

        info!(
            "Generated {} of {} {} recommendations",
            recommendations.len(),
            stocks.len(),
            kind_label(kind)
        );
        recommendations
    }

    async fn fetch_quotes(&self, stocks: &[CuratedStock], as_of: NaiveDate) -> Vec<Result<Quote>> {
        match self.client.batch_pacing() {
            BatchPacing::Concurrent => {
                join_all(stocks.iter().map(|stock| self.client.quote(stock.symbol, as_of))).await
            }
            BatchPacing::Sequential { delay } => {
                debug!("Fetching {} quotes sequentially, {:?} apart", stocks.len(), delay);
                let mut quotes = Vec::with_capacity(stocks.len());
                for (i, stock) in stocks.iter().enumerate() {
                    if i > 0 && !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    quotes.push(self.client.quote(stock.symbol, as_of).await);
                }
                quotes
            }
        }
    }
}

fn kind_label(kind: RecommendationKind) -> &'static str {
    match kind {
        RecommendationKind::Buy => "buy",
        RecommendationKind::Sell => "sell",
        RecommendationKind::Hold => "hold",
    }
}

/// Price a curated stock into a recommendation.
///
/// Confidence and target price are only drawn for buy and sell.
pub fn build_recommendation<R: Rng + ?Sized>(
    stock: &CuratedStock,
    quote: &Quote,
    kind: RecommendationKind,
    date: NaiveDate,
    rng: &mut R,
) -> StockRecommendation {
    let favorite = stock.is_retail_favorite;

    let confidence = match (kind, favorite) {
        (RecommendationKind::Buy, true) => Some(rng.gen_range(85..=99)),
        (RecommendationKind::Buy, false) => Some(rng.gen_range(75..=94)),
        (RecommendationKind::Sell, true) => Some(rng.gen_range(65..=89)),
        (RecommendationKind::Sell, false) => Some(rng.gen_range(75..=94)),
        (RecommendationKind::Hold, _) => None,
    };

    let spread: f64 = rng.gen_range(0.0..0.10);
    let target_price = match kind {
        RecommendationKind::Buy => {
            Some(quote.price * (1.0 + spread + if favorite { 0.08 } else { 0.05 }))
        }
        RecommendationKind::Sell => {
            Some(quote.price * (1.0 - (spread + if favorite { 0.05 } else { 0.08 })))
        }
        RecommendationKind::Hold => None,
    };

    StockRecommendation {
        symbol: stock.symbol.to_string(),
        name: stock.name.to_string(),
        price: quote.price,
        change: quote.change,
        change_percent: quote.change_percent,
        recommendation: kind,
        confidence,
        analysis: Some(stock.analysis.to_string()),
        target_price,
        date: Some(date),
        is_retail_favorite: Some(favorite),
        sources: select_sources(favorite, rng),
    }
}

/// Recommendations made on `date`; undated ones always pass.
pub fn filter_recommendations_by_date(
    recommendations: &[StockRecommendation],
    date: Option<NaiveDate>,
) -> Vec<StockRecommendation> {
    let Some(date) = date else {
        return recommendations.to_vec();
    };
    recommendations
        .iter()
        .filter(|rec| rec.date.map_or(true, |d| d == date))
        .cloned()
        .collect()
}
