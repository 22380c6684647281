//! Expiry sweep: convert lapsed reservations to `expired` and release
//! their product holds.
//!
//! Invoked before every order read so observed state is current
//! relative to wall-clock time, and periodically from the background
//! task. Safe to run concurrently: the status flip is a
//! compare-and-swap, so a reservation is expired exactly once.

use std::collections::HashSet;

use rnr_core::types::DbId;
use rnr_db::repositories::{OrderRepo, ProductRepo};
use rnr_db::DbPool;

/// Counts from one sweep pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepOutcome {
    /// Reservations moved to `expired` by this pass.
    pub expired: usize,
    /// Reservations that failed to expire; they stay `reserved` and are
    /// retried on the next pass.
    pub failed: usize,
}

/// Run one sweep pass. Never fails: a bad record is logged and skipped
/// so it cannot block the rest of the sweep or the read that triggered it.
pub async fn sweep_expired(pool: &DbPool) -> SweepOutcome {
    let ids = match OrderRepo::find_expired_ids(pool).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(error = %e, "Expiry sweep: scan failed");
            return SweepOutcome::default();
        }
    };

    let mut outcome = SweepOutcome::default();
    for id in ids {
        match expire_one(pool, id).await {
            Ok(true) => {
                tracing::info!(order_id = id, "Reservation expired");
                outcome.expired += 1;
            }
            // Another sweeper or an admin got there first.
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(order_id = id, error = %e, "Expiry sweep: order skipped, will retry");
                outcome.failed += 1;
            }
        }
    }
    outcome
}

/// Expire a single reservation in its own transaction: CAS the status,
/// then release the hold on every referenced product.
async fn expire_one(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    if !OrderRepo::expire_if_due(&mut *tx, id).await? {
        return Ok(false);
    }

    let items = OrderRepo::items_for(&mut *tx, id).await?;
    let mut seen = HashSet::new();
    for item in items {
        if seen.insert(item.product_id) {
            ProductRepo::release_hold(&mut *tx, item.product_id).await?;
        }
    }

    tx.commit().await?;
    Ok(true)
}
