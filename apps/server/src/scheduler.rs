//! Background warm-up of the dashboard datasets.
//!
//! Each tick refreshes whatever has gone stale, so requests are served from
//! cache even after the refresh window has passed.

use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::main_lib::AppState;

/// Initial delay before the first warm-up, to let the server start listening
const INITIAL_DELAY_SECS: u64 = 5;

/// Starts the warm-up loop; a zero `every` disables it.
pub fn start_warmup_scheduler(state: Arc<AppState>, every: Duration) {
    if every.is_zero() {
        info!("Warm-up scheduler disabled");
        return;
    }

    tokio::spawn(async move {
        info!("Warm-up scheduler started ({}s interval)", every.as_secs());

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        // First tick is immediate, later ones are `every` apart
        let mut warmup_interval = interval(every);
        warmup_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            warmup_interval.tick().await;
            run_warmup(&state).await;
        }
    });
}

/// Runs a single warm-up pass.
pub async fn run_warmup(state: &Arc<AppState>) {
    debug!("Running scheduled warm-up...");
    state.dashboard.warm_up().await;

    let stale: Vec<_> = state
        .dashboard
        .resource_status()
        .await
        .into_iter()
        .filter(|status| status.stale)
        .map(|status| status.name)
        .collect();
    if stale.is_empty() {
        debug!("Warm-up complete, all datasets fresh");
    } else {
        info!("Warm-up complete, still stale: {}", stale.join(", "));
    }
}
