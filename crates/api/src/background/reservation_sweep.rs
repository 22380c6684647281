//! Periodic expiry sweep.
//!
//! The sweep already runs inline before every order read; this task
//! bounds how long a lapsed hold can linger when no reads arrive.
//! Runs on a fixed interval using `tokio::time::interval`.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::lifecycle::sweep::sweep_expired;
use rnr_db::DbPool;

/// Run the reservation sweep loop until `cancel` is triggered.
pub async fn run(pool: DbPool, interval_secs: u64, cancel: CancellationToken) {
    tracing::info!(interval_secs, "Reservation sweep job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Reservation sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                let outcome = sweep_expired(&pool).await;
                if outcome.expired > 0 || outcome.failed > 0 {
                    tracing::info!(
                        expired = outcome.expired,
                        failed = outcome.failed,
                        "Reservation sweep: pass complete"
                    );
                } else {
                    tracing::debug!("Reservation sweep: nothing to expire");
                }
            }
        }
    }
}
