//! Customer input validation for reservation requests.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Jordanian mobile numbers: `+962` followed by 8 or 9 digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+962\d{8,9}$").expect("phone regex is valid"));

/// Validate the customer name is present and non-blank.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Customer name is required".into()));
    }
    Ok(())
}

/// Validate the phone number against the Jordanian mobile pattern.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if !PHONE_RE.is_match(phone) {
        return Err(CoreError::Validation(
            "Invalid phone number format. Expected +962 followed by 8-9 digits".into(),
        ));
    }
    Ok(())
}
