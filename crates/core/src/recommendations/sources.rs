//! Attribution catalog.
//!
//! Every recommendation gets one analyst and one news source, retail
//! favorites also get a retail community, and half of them a research house.

use rand::Rng;

use super::RecommendationSource;

/// Catalog tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTier {
    News,
    Analyst,
    Retail,
    Research,
}

impl SourceTier {
    pub fn catalog(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::News => &[
                ("Bloomberg Markets", "https://www.bloomberg.com/markets"),
                ("CNBC Market Data", "https://www.cnbc.com/world-markets/"),
                ("Financial Times", "https://www.ft.com"),
                ("Wall Street Journal", "https://www.wsj.com"),
                ("Reuters Business", "https://www.reuters.com/business/"),
            ],
            Self::Analyst => &[
                ("Goldman Sachs", "https://www.goldmansachs.com"),
                ("Morgan Stanley", "https://www.morganstanley.com"),
                ("JPMorgan", "https://www.jpmorgan.com"),
                ("Bank of America", "https://www.bankofamerica.com"),
                ("Citigroup", "https://www.citigroup.com"),
            ],
            Self::Retail => &[
                ("Reddit r/wallstreetbets", "https://www.reddit.com/r/wallstreetbets/"),
                ("StockTwits", "https://stocktwits.com"),
                ("Seeking Alpha", "https://seekingalpha.com"),
                ("Twitter Finance", "https://twitter.com"),
                ("Yahoo Finance", "https://finance.yahoo.com"),
            ],
            Self::Research => &[
                ("Morningstar", "https://www.morningstar.com"),
                ("S&P Global", "https://www.spglobal.com"),
                ("Zacks", "https://www.zacks.com"),
                ("TradingView", "https://www.tradingview.com"),
                ("Benzinga", "https://www.benzinga.com"),
            ],
        }
    }

    fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> RecommendationSource {
        let catalog = self.catalog();
        let (name, url) = catalog[rng.gen_range(0..catalog.len())];
        RecommendationSource {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// Sources for one recommendation, first occurrence of each name kept.
pub fn select_sources<R: Rng + ?Sized>(
    is_retail_favorite: bool,
    rng: &mut R,
) -> Vec<RecommendationSource> {
    let mut picked = vec![SourceTier::Analyst.pick(rng)];
    if is_retail_favorite {
        picked.push(SourceTier::Retail.pick(rng));
    }
    picked.push(SourceTier::News.pick(rng));
    if rng.gen_bool(0.5) {
        picked.push(SourceTier::Research.pick(rng));
    }

    let mut sources: Vec<RecommendationSource> = Vec::with_capacity(picked.len());
    for source in picked {
        if !sources.iter().any(|s| s.name == source.name) {
            sources.push(source);
        }
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn names(tier: SourceTier) -> HashSet<&'static str> {
        tier.catalog().iter().map(|(name, _)| *name).collect()
    }

    #[test]
    fn test_tier_composition() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let favorite = select_sources(true, &mut rng);
            assert!(names(SourceTier::Analyst).contains(favorite[0].name.as_str()));
            assert!(names(SourceTier::Retail).contains(favorite[1].name.as_str()));
            assert!(names(SourceTier::News).contains(favorite[2].name.as_str()));
            assert!((3..=4).contains(&favorite.len()));

            let plain = select_sources(false, &mut rng);
            assert!(plain
                .iter()
                .all(|s| !names(SourceTier::Retail).contains(s.name.as_str())));
            assert!((2..=3).contains(&plain.len()));
        }
    }

    #[test]
    fn test_research_roughly_half_the_time() {
        let mut rng = StdRng::seed_from_u64(11);
        let with_research = (0..1000)
            .filter(|_| select_sources(false, &mut rng).len() == 3)
            .count();
        assert!((400..=600).contains(&with_research));
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let all: Vec<&str> = [
            SourceTier::News,
            SourceTier::Analyst,
            SourceTier::Retail,
            SourceTier::Research,
        ]
        .iter()
        .flat_map(|t| t.catalog().iter().map(|(name, _)| *name))
        .collect();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }
}
