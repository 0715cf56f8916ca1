//! Small field-level validators shared by the inbound DTOs.

use crate::error::CoreError;

/// Reject a string longer than `max` characters (not bytes).
pub fn check_max_chars(field: &str, value: Option<&str>, max: usize) -> Result<(), CoreError> {
    match value {
        Some(v) if v.chars().count() > max => Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

/// Unwrap a required field or fail with a validation error naming it.
pub fn require<T>(field: &str, value: Option<T>) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}
