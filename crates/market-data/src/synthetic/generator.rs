use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::seed::symbol_seed;
use crate::models::{Quote, SYNTHETIC_SOURCE};

const MIN_CHANGE_PERCENT: f64 = 0.1;
const MAX_CHANGE_PERCENT: f64 = 3.0;

/// Reference level for a symbol before the daily move is applied.
///
/// The three dashboard indices use realistic fixed levels. Everything else
/// lands in `[10, 499]` from the symbol seed.
pub fn base_price(symbol: &str) -> f64 {
    match symbol {
        "^GSPC" => 5220.12,
        "^IXIC" => 16420.98,
        "^DJI" => 39105.73,
        _ => f64::from(symbol_seed(symbol) % 490 + 10),
    }
}

/// Produces plausible quotes without touching the network.
///
/// Direction and magnitude both come from a generator seeded by the symbol
/// and the calendar date, so every call for the same pair agrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticQuoteGenerator;

impl SyntheticQuoteGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn quote(&self, symbol: &str, as_of: NaiveDate) -> Quote {
        let seed = symbol_seed(symbol);
        let base = base_price(symbol);

        let is_up = (u64::from(seed) + u64::from(as_of.ordinal())) % 2 == 0;

        let mut rng = StdRng::seed_from_u64(Self::rng_seed(seed, as_of));
        let magnitude = rng.gen_range(MIN_CHANGE_PERCENT..=MAX_CHANGE_PERCENT);
        let change_percent = if is_up { magnitude } else { -magnitude };

        let change = base * change_percent / 100.0;
        let price = base + change;

        // Percent is quoted against the base, which is the previous close here.
        Quote::new(price, change, change_percent, SYNTHETIC_SOURCE)
    }

    fn rng_seed(seed: u32, as_of: NaiveDate) -> u64 {
        (u64::from(seed) << 32) | u64::from(as_of.num_days_from_ce() as u32)
    }
}
