//! Background scheduler for periodic exchange rate refreshes.

use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::main_lib::AppState;

/// Initial delay before the first refresh, to let the server fully start.
const INITIAL_DELAY_SECS: u64 = 5;

/// Starts refreshing the CZK to GBP rate every `every`.
pub fn start_rate_refresh_scheduler(state: Arc<AppState>, every: Duration) {
    tokio::spawn(async move {
        info!(
            "Rate refresh scheduler started ({}s interval)",
            every.as_secs()
        );

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        // First tick is immediate.
        let mut refresh_interval = interval(every);
        refresh_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            refresh_interval.tick().await;
            run_scheduled_refresh(&state).await;
        }
    });
}

async fn run_scheduled_refresh(state: &Arc<AppState>) {
    debug!("Running scheduled rate refresh...");
    match state.fx_service.refresh().await {
        Ok(rate) => info!(
            "Scheduled rate refresh completed: 1 {} = {} {}",
            rate.from_currency, rate.value, rate.to_currency
        ),
        Err(e) => warn!("Scheduled rate refresh failed, keeping previous rate: {}", e),
    }
}
