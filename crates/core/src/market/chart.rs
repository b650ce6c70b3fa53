//! Twelve-month index chart ending at the current levels.

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::CHART_MONTHS;

use super::{ChartPoint, IndexLevels};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Monthly points, oldest first, ending in the month of `as_of`.
///
/// Earlier months ramp up from 85% of the current level with up to 5%
/// noise either way. The noise is seeded by `as_of`, so a given day always
/// yields the same series. The last point equals `levels` exactly.
pub fn synthesize(levels: &IndexLevels, as_of: NaiveDate) -> Vec<ChartPoint> {
    let mut rng = StdRng::seed_from_u64(as_of.num_days_from_ce() as u64);
    let months = CHART_MONTHS as i32;

    (0..months)
        .rev()
        .map(|months_back| {
            let factor = (months - months_back) as f64 / months as f64;
            let trend = 0.85 + factor * 0.15;
            let mut point = |current: f64| {
                if months_back == 0 {
                    current
                } else {
                    current * trend * rng.gen_range(0.95..=1.05)
                }
            };
            let sp500 = point(levels.sp500);
            let nasdaq = point(levels.nasdaq);
            let dowjones = point(levels.dowjones);

            ChartPoint {
                label: month_label(as_of, months_back),
                sp500,
                nasdaq,
                dowjones,
            }
        })
        .collect()
}

fn month_label(as_of: NaiveDate, months_back: i32) -> String {
    let total = as_of.year() * 12 + as_of.month0() as i32 - months_back;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as usize;
    format!("{} {}", MONTH_LABELS[month], year)
}
