//! Transactional reservation operations.
//!
//! Every operation here applies its order mutation and the implied
//! product flag updates inside a single transaction, so a crash can
//! never leave a product held without a matching order (or vice versa).
//! Side effects are always computed from the status re-read under a row
//! lock, never from the caller's assumption of it.

use std::collections::HashSet;

use chrono::Utc;

use rnr_core::error::CoreError;
use rnr_core::status::{transition_effect, OrderStatus, TransitionEffect};
use rnr_core::types::DbId;
use rnr_core::{customer, reservation};
use rnr_db::models::order::{CreateOrder, Order, OrderItem, OrderWithItems, UpdateOrder};
use rnr_db::repositories::{OrderRepo, ProductRepo, SettingsRepo};
use rnr_db::DbPool;

use crate::error::{AppError, AppResult};

/// Create a reservation: validate input, compute the deadline from the
/// configured duration, then atomically insert the order with its
/// line-item snapshots and place a hold on every referenced product.
///
/// If any product is already sold or held, the whole transaction rolls
/// back and the caller gets a Conflict naming the unavailable item.
pub async fn create_reservation(pool: &DbPool, input: &CreateOrder) -> AppResult<OrderWithItems> {
    customer::validate_name(&input.customer.name)?;
    customer::validate_phone(&input.customer.phone)?;
    if input.items.is_empty() {
        return Err(CoreError::Validation("At least one item is required".into()).into());
    }
    for item in &input.items {
        if item.quantity < 1 {
            return Err(CoreError::Validation(format!(
                "Quantity for \"{}\" must be at least 1",
                item.name
            ))
            .into());
        }
    }

    let settings = SettingsRepo::get_or_init(pool).await?;
    let reserved_until = reservation::deadline(Utc::now(), i64::from(settings.reservation_days));

    let subtotal: f64 = input
        .items
        .iter()
        .map(|i| i.price * f64::from(i.quantity))
        .sum();
    // Cash at pickup: no tax or delivery fee in this flow.
    let total = subtotal;

    let mut tx = pool.begin().await?;

    let order =
        OrderRepo::insert_order(&mut *tx, &input.customer, subtotal, total, reserved_until).await?;
    let items = OrderRepo::insert_items(&mut tx, order.id, &input.items).await?;

    for (product_id, name) in distinct_products(input.items.iter().map(|i| (i.product_id, &i.name)))
    {
        if !ProductRepo::try_hold(&mut *tx, product_id).await? {
            // Dropping the transaction rolls back the order insert.
            return Err(CoreError::Conflict(format!("\"{name}\" is no longer available")).into());
        }
    }

    tx.commit().await?;

    tracing::info!(
        order_id = order.id,
        items = items.len(),
        reserved_until = %order.reserved_until,
        "Reservation created"
    );

    Ok(OrderWithItems { order, items })
}

/// Apply an admin order update (`status` and/or `reserved_until`).
///
/// Re-reads the current status under a row lock, computes the product
/// side effect from the transition table, applies it, and persists the
/// change — all in one transaction.
pub async fn update_order(pool: &DbPool, id: DbId, input: &UpdateOrder) -> AppResult<OrderWithItems> {
    let requested = input
        .status
        .as_deref()
        .map(OrderStatus::parse)
        .transpose()?;
    if requested.is_none() && input.reserved_until.is_none() {
        return Err(AppError::BadRequest(
            "Provide status and/or reserved_until".into(),
        ));
    }

    let mut tx = pool.begin().await?;

    let current = OrderRepo::lock_by_id(&mut tx, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Order",
            id,
        })?;
    let current_status = stored_status(&current)?;
    let new_status = requested.unwrap_or(current_status);

    let effect = transition_effect(current_status, new_status)?;
    if effect == TransitionEffect::AcquireHold {
        let until = input.reserved_until.ok_or_else(|| {
            CoreError::Validation(
                "Reactivating an expired order requires a new reserved_until".into(),
            )
        })?;
        if until <= Utc::now() {
            return Err(CoreError::Validation("reserved_until must be in the future".into()).into());
        }
    }

    let (order, items) =
        apply_transition(&mut tx, &current, new_status, effect, input.reserved_until).await?;

    tx.commit().await?;

    tracing::info!(
        order_id = id,
        from = %current_status,
        to = %new_status,
        "Order updated"
    );

    Ok(OrderWithItems { order, items })
}

/// Extend a reservation by `days` (must be >= 1).
///
/// The new deadline is `max(current deadline, now) + days`. An expired
/// order is reactivated: its status returns to `reserved` and the
/// product holds are re-acquired (Conflict if a unit was taken in the
/// meantime). Terminal orders cannot be extended.
pub async fn extend_reservation(pool: &DbPool, id: DbId, days: i64) -> AppResult<OrderWithItems> {
    reservation::validate_extension_days(days)?;

    let mut tx = pool.begin().await?;

    let current = OrderRepo::lock_by_id(&mut tx, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Order",
            id,
        })?;
    let current_status = stored_status(&current)?;
    if !matches!(current_status, OrderStatus::Reserved | OrderStatus::Expired) {
        return Err(CoreError::Conflict(format!(
            "Cannot extend a {current_status} order"
        ))
        .into());
    }

    let new_status = OrderStatus::Reserved;
    let effect = transition_effect(current_status, new_status)?;
    let new_until = reservation::extended_deadline(current.reserved_until, Utc::now(), days);

    let (order, items) =
        apply_transition(&mut tx, &current, new_status, effect, Some(new_until)).await?;

    tx.commit().await?;

    tracing::info!(
        order_id = id,
        days,
        reserved_until = %order.reserved_until,
        "Reservation extended"
    );

    Ok(OrderWithItems { order, items })
}

/// Apply the product side effect and persist the order change. Runs on
/// the caller's transaction; the caller commits.
async fn apply_transition(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    current: &Order,
    new_status: OrderStatus,
    effect: TransitionEffect,
    reserved_until: Option<rnr_core::types::Timestamp>,
) -> AppResult<(Order, Vec<OrderItem>)> {
    let items = OrderRepo::items_for(&mut **tx, current.id).await?;
    let products = distinct_products(items.iter().map(|i| (i.product_id, &i.name)));

    match effect {
        TransitionEffect::MarkSold => {
            for (product_id, _) in products {
                ProductRepo::mark_sold(&mut **tx, product_id).await?;
            }
        }
        TransitionEffect::ReleaseHold => {
            for (product_id, _) in products {
                ProductRepo::release_hold(&mut **tx, product_id).await?;
            }
        }
        TransitionEffect::AcquireHold => {
            for (product_id, name) in products {
                if !ProductRepo::try_hold(&mut **tx, product_id).await? {
                    return Err(
                        CoreError::Conflict(format!("\"{name}\" is no longer available")).into(),
                    );
                }
            }
        }
        TransitionEffect::None => {}
    }

    let order =
        OrderRepo::update_status(&mut **tx, current.id, new_status.as_str(), reserved_until)
            .await?;
    Ok((order, items))
}

/// Parse the status column of a stored order. The CHECK constraint
/// keeps the column within the domain, so a parse failure here means
/// the store itself is corrupt.
fn stored_status(order: &Order) -> Result<OrderStatus, AppError> {
    OrderStatus::parse(&order.status).map_err(|_| {
        CoreError::Internal(format!(
            "Order {} has invalid stored status '{}'",
            order.id, order.status
        ))
        .into()
    })
}

/// Each product is a single physical unit; a product referenced by
/// several line items gets exactly one hold operation.
fn distinct_products<'a>(
    items: impl Iterator<Item = (DbId, &'a String)>,
) -> Vec<(DbId, String)> {
    let mut seen = HashSet::new();
    items
        .filter(|(id, _)| seen.insert(*id))
        .map(|(id, name)| (id, name.clone()))
        .collect()
}
