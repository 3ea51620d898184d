//! Annual budget constraints for facilities.
//!
//! Budgets are stored as `NUMERIC(12, 2)`: at most 12 significant digits,
//! two of them after the decimal point.

use rust_decimal::Decimal;

use crate::error::{CoreError, FieldError};

/// Digits after the decimal point.
pub const BUDGET_SCALE: u32 = 2;

/// Total significant digits allowed.
pub const BUDGET_MAX_DIGITS: u32 = 12;

/// Validate a budget and rescale it to two decimal places.
pub fn validate_budget(value: Decimal) -> Result<Decimal, CoreError> {
    let normalized = value.normalize();
    if normalized.scale() > BUDGET_SCALE {
        return Err(budget_error(format!(
            "Ensure that there are no more than {BUDGET_SCALE} decimal places."
        )));
    }

    let max_integer_digits = BUDGET_MAX_DIGITS - BUDGET_SCALE;
    let limit = Decimal::from(10_i64.pow(max_integer_digits));
    if normalized.abs() >= limit {
        return Err(budget_error(format!(
            "Ensure that there are no more than {max_integer_digits} digits before the decimal point."
        )));
    }

    let mut rescaled = normalized;
    rescaled.rescale(BUDGET_SCALE);
    Ok(rescaled)
}

fn budget_error(message: String) -> CoreError {
    CoreError::InvalidField(FieldError::new("annual_budget", message))
}
