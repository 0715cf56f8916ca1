//! ASINs flagged for later review.

use crate::error::CoreError;

/// Length of an Amazon Standard Identification Number.
pub const ASIN_LENGTH: usize = 10;

/// Counter value written on first sight. Later writes never change it.
pub const INITIAL_COUNTER: i32 = 0;

/// Validate an ASIN and normalize it to upper case.
pub fn normalize_code(raw: &str) -> Result<String, CoreError> {
    let code = raw.trim();
    if code.len() != ASIN_LENGTH || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::Validation(format!(
            "asin must be {ASIN_LENGTH} ASCII letters or digits"
        )));
    }
    Ok(code.to_ascii_uppercase())
}
