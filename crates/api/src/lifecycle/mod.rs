//! Reservation lifecycle engine.
//!
//! The only component that writes the `sold`/`reserved` product flags as
//! a consequence of order-status changes. `engine` holds the
//! transactional operations (create, status update, extension); `sweep`
//! converts lapsed reservations to `expired` and releases their holds.

pub mod engine;
pub mod sweep;
