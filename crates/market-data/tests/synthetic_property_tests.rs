//! Property-based tests for synthetic quotes and symbol seeds.

use chrono::NaiveDate;
use proptest::prelude::*;
use marketpulse_market_data::{base_price, symbol_seed, SyntheticQuoteGenerator, SYNTHETIC_SOURCE};

// =============================================================================
// Generators
// =============================================================================

/// Ticker-like symbols, with the occasional caret index.
fn arb_symbol() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z]{1,5}",
        "[A-Z]{1,4}\\.[A-Z]",
        "\\^[A-Z]{2,5}",
        Just("^GSPC".to_string()),
        Just("^IXIC".to_string()),
        Just("^DJI".to_string()),
    ]
}

/// Dates over a few decades.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2060, 1u32..=366).prop_filter_map("valid ordinal", |(year, day)| {
        NaiveDate::from_yo_opt(year, day)
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Same symbol and date always give the same quote.
    #[test]
    fn prop_same_day_quotes_identical(symbol in arb_symbol(), date in arb_date()) {
        let generator = SyntheticQuoteGenerator::new();
        prop_assert_eq!(generator.quote(&symbol, date), generator.quote(&symbol, date));
    }

    /// Synthetic prices stay positive and the move is between 0.1% and 3%.
    #[test]
    fn prop_synthetic_quote_is_plausible(symbol in arb_symbol(), date in arb_date()) {
        let quote = SyntheticQuoteGenerator::new().quote(&symbol, date);

        prop_assert!(quote.price > 0.0);
        prop_assert!(quote.change_percent.abs() >= 0.1 - 1e-9);
        prop_assert!(quote.change_percent.abs() <= 3.0 + 1e-9);
        prop_assert_eq!(quote.source.as_str(), SYNTHETIC_SOURCE);

        let implied = quote.change / base_price(&symbol) * 100.0;
        prop_assert!((implied - quote.change_percent).abs() < 1e-6);
    }

    /// Seeds depend only on the symbol text.
    #[test]
    fn prop_seed_is_deterministic(symbol in ".{0,12}") {
        prop_assert_eq!(symbol_seed(&symbol), symbol_seed(&symbol.clone()));
    }

    /// Non-index base prices fall in [10, 499].
    #[test]
    fn prop_base_price_range(symbol in "[A-Z]{1,6}") {
        let base = base_price(&symbol);
        prop_assert!((10.0..=499.0).contains(&base));
        prop_assert_eq!(base.fract(), 0.0);
    }
}

#[test]
fn index_base_levels_are_fixed() {
    assert_eq!(base_price("^GSPC"), 5220.12);
    assert_eq!(base_price("^IXIC"), 16420.98);
    assert_eq!(base_price("^DJI"), 39105.73);
}
