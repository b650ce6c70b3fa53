//! Property-based integration tests for refresh policies, the chart series
//! and recommendation records.

use chrono::{Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

use marketpulse_core::market::{synthesize, IndexLevels};
use marketpulse_core::quotes::Quote;
use marketpulse_core::recommendations::recommendation_generator::build_recommendation;
use marketpulse_core::recommendations::{select_sources, RecommendationKind, BUY_LIST, SELL_LIST};
use marketpulse_core::refresh::RefreshPolicy;

// =============================================================================
// Generators
// =============================================================================

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2060, 1u32..=366).prop_filter_map("valid ordinal", |(year, day)| {
        NaiveDate::from_yo_opt(year, day)
    })
}

fn arb_levels() -> impl Strategy<Value = IndexLevels> {
    (1.0f64..10_000.0, 1.0f64..30_000.0, 1.0f64..60_000.0).prop_map(|(sp500, nasdaq, dowjones)| {
        IndexLevels {
            sp500,
            nasdaq,
            dowjones,
        }
    })
}

fn arb_kind() -> impl Strategy<Value = RecommendationKind> {
    prop_oneof![
        Just(RecommendationKind::Buy),
        Just(RecommendationKind::Sell),
        Just(RecommendationKind::Hold),
    ]
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// An interval policy turns stale exactly when the interval has elapsed.
    #[test]
    fn prop_interval_boundary(minutes in 1u32..600, elapsed_secs in 0i64..50_000) {
        let last = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let now = last + Duration::seconds(elapsed_secs);
        let offset = FixedOffset::east_opt(0).unwrap();

        let stale = RefreshPolicy::interval(minutes).is_stale(Some(last), now, offset);
        prop_assert_eq!(stale, elapsed_secs >= i64::from(minutes) * 60);
    }

    /// A daily policy is fresh for any two instants on the same local date.
    #[test]
    fn prop_daily_fresh_within_day(
        date in arb_date(),
        first_secs in 0u32..86_400,
        second_secs in 0u32..86_400,
        offset_hours in -12i32..=14,
    ) {
        let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let at = |secs: u32| {
            offset
                .from_local_datetime(&date.and_hms_opt(secs / 3600, (secs / 60) % 60, secs % 60).unwrap())
                .unwrap()
                .with_timezone(&Utc)
        };
        let (a, b) = (at(first_secs.min(second_secs)), at(first_secs.max(second_secs)));

        prop_assert!(!RefreshPolicy::Daily.is_stale(Some(a), b, offset));
        prop_assert!(RefreshPolicy::Daily.is_stale(Some(a), b + Duration::days(1), offset));
        prop_assert!(RefreshPolicy::Daily.is_stale(None, b, offset));
    }

    /// The chart has twelve distinct months and ends at the current levels.
    #[test]
    fn prop_chart_ends_at_current_levels(levels in arb_levels(), as_of in arb_date()) {
        let series = synthesize(&levels, as_of);
        prop_assert_eq!(series.len(), 12);

        let last = series.last().unwrap();
        prop_assert_eq!(last.sp500, levels.sp500);
        prop_assert_eq!(last.nasdaq, levels.nasdaq);
        prop_assert_eq!(last.dowjones, levels.dowjones);

        let labels: HashSet<_> = series.iter().map(|p| p.label.clone()).collect();
        prop_assert_eq!(labels.len(), 12);
        prop_assert!(series.iter().all(|p| p.sp500 > 0.0 && p.nasdaq > 0.0 && p.dowjones > 0.0));
    }

    /// Confidence stays in [0, 100] and targets point the way of the call.
    #[test]
    fn prop_recommendation_invariants(
        price in 0.5f64..5_000.0,
        seed in any::<u64>(),
        index in 0usize..4,
        kind in arb_kind(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let stock = if kind == RecommendationKind::Sell { &SELL_LIST[index] } else { &BUY_LIST[index] };
        let quote = Quote::new(price, 0.0, 0.0, "SYNTHETIC");
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();

        let rec = build_recommendation(stock, &quote, kind, date, &mut rng);

        if let Some(confidence) = rec.confidence {
            prop_assert!(confidence <= 100);
        }
        match kind {
            RecommendationKind::Buy => prop_assert!(rec.target_price.unwrap() > price),
            RecommendationKind::Sell => prop_assert!(rec.target_price.unwrap() < price),
            RecommendationKind::Hold => {
                prop_assert!(rec.target_price.is_none());
                prop_assert!(rec.confidence.is_none());
            }
        }
    }

    /// Source names never repeat.
    #[test]
    fn prop_sources_unique(seed in any::<u64>(), favorite in any::<bool>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let sources = select_sources(favorite, &mut rng);
        let names: HashSet<_> = sources.iter().map(|s| s.name.as_str()).collect();

        prop_assert_eq!(names.len(), sources.len());
        prop_assert!(sources.len() >= 2);
    }
}
