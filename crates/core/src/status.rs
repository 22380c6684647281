//! Reservation status state machine.
//!
//! Defines the four-value status domain for orders and the product
//! side-effect each transition implies. The effect is always computed
//! from the *stored* status and the requested one, never from which
//! fields a caller happened to send, so repeated admin actions stay
//! idempotent.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of an order (reservation).
///
/// `PickedUp` and `Cancelled` are terminal. `Expired` can be
/// reactivated by an admin extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Reserved,
    PickedUp,
    Cancelled,
    Expired,
}

/// All valid status values, as stored in the `orders.status` column.
pub const VALID_STATUSES: &[&str] = &["reserved", "picked_up", "cancelled", "expired"];

impl OrderStatus {
    /// Return the database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Reserved => "reserved",
            OrderStatus::PickedUp => "picked_up",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Expired => "expired",
        }
    }

    /// Parse a status string, rejecting anything outside the domain.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "reserved" => Ok(OrderStatus::Reserved),
            "picked_up" => Ok(OrderStatus::PickedUp),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "expired" => Ok(OrderStatus::Expired),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product flag update implied by a status transition, applied to every
/// line item of the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    /// The unit left the shop: `sold = true`, `reserved = false`.
    MarkSold,
    /// The hold lapsed or was cancelled: `reserved = false`.
    ReleaseHold,
    /// An expired reservation is reactivated: conditionally set
    /// `reserved = true` again (fails if the unit was taken meanwhile).
    AcquireHold,
    /// No product change.
    None,
}

/// Compute the product side effect of moving an order from `current`
/// to `requested`.
///
/// Same-status writes are accepted as no-ops so that, for example,
/// cancelling an already-cancelled order does not release holds twice.
/// Pairs outside the declared table (anything out of a terminal state,
/// `expired -> picked_up`) are rejected as conflicts.
pub fn transition_effect(
    current: OrderStatus,
    requested: OrderStatus,
) -> Result<TransitionEffect, CoreError> {
    use OrderStatus::*;

    match (current, requested) {
        (a, b) if a == b => Ok(TransitionEffect::None),
        (Reserved, PickedUp) => Ok(TransitionEffect::MarkSold),
        (Reserved, Cancelled) => Ok(TransitionEffect::ReleaseHold),
        (Reserved, Expired) => Ok(TransitionEffect::ReleaseHold),
        (Expired, Cancelled) => Ok(TransitionEffect::ReleaseHold),
        (Expired, Reserved) => Ok(TransitionEffect::AcquireHold),
        (from, to) => Err(CoreError::Conflict(format!(
            "Cannot move a {from} order to {to}"
        ))),
    }
}
