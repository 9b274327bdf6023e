//! Validation helper functions for configuration types.

use crate::core::errors::{PhashError, Result};

/// Validate that a usize value is greater than zero.
pub fn validate_positive_usize(value: usize, field: &str) -> Result<()> {
    if value == 0 {
        return Err(PhashError::config_field(
            format!("{} must be greater than 0", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that an f32 value is in the unit range [0.0, 1.0].
pub fn validate_unit_range(value: f32, field: &str) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(PhashError::config_field(
            format!("{} must be between 0.0 and 1.0, got {}", field, value),
            field,
        ));
    }
    Ok(())
}

/// Validate that a u32 value does not exceed `max` (inclusive).
pub fn validate_at_most_u32(value: u32, max: u32, field: &str) -> Result<()> {
    if value > max {
        return Err(PhashError::config_field(
            format!("{} must be at most {}, got {}", field, max, value),
            field,
        ));
    }
    Ok(())
}
