//! Two-decimal amounts stored in `DECIMAL(10,2)` columns.

use crate::error::{AnalysisError, Result};

/// Largest magnitude a `DECIMAL(10,2)` column can hold, exclusive.
pub const DECIMAL_LIMIT: f64 = 100_000_000.0;

/// Round to two decimal places, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Parse a user-supplied amount and round it to two decimals.
pub fn parse_amount(input: &str) -> Result<f64> {
    let value: f64 = input.trim().parse()?;
    check_decimal("amount", value)?;
    Ok(round2(value))
}

/// Reject values that cannot be stored as `DECIMAL(10,2)`.
pub(crate) fn check_decimal(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AnalysisError::invalid_input(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    if value.abs() >= DECIMAL_LIMIT {
        return Err(AnalysisError::invalid_input(format!(
            "{field} {value} does not fit DECIMAL(10,2)"
        )));
    }
    Ok(())
}

/// Like [`check_decimal`], additionally requiring a non-negative value.
pub(crate) fn check_energy(field: &str, value: f64) -> Result<()> {
    check_decimal(field, value)?;
    if value < 0.0 {
        return Err(AnalysisError::invalid_input(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}
