//! Reservation deadline arithmetic.

use chrono::Duration;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Reservation duration used when no settings row exists yet.
pub const DEFAULT_RESERVATION_DAYS: i32 = 2;

/// Clamp a configured reservation duration to at least one day.
pub fn clamp_reservation_days(days: i32) -> i32 {
    days.max(1)
}

/// Validate an extension duration supplied by the caller.
pub fn validate_extension_days(days: i64) -> Result<(), CoreError> {
    if days < 1 {
        return Err(CoreError::Validation(
            "Extension must be at least 1 day".into(),
        ));
    }
    Ok(())
}

/// Deadline for a fresh reservation: `from + days`.
pub fn deadline(from: Timestamp, days: i64) -> Timestamp {
    from + Duration::days(days)
}

/// Deadline for an extension: `max(current, now) + days`.
///
/// Extending before expiry adds to the remaining window; extending an
/// already-expired reservation counts from now.
pub fn extended_deadline(current: Timestamp, now: Timestamp, days: i64) -> Timestamp {
    current.max(now) + Duration::days(days)
}
