//! Field validation shared by the category and expense services.
//!
//! Every function here is pure: no I/O and no shared state. Services run these
//! checks before touching a store, so a failure means zero store calls.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::ValidationError;
use crate::utils::time_utils;

/// Fails if `value` is absent, empty, or whitespace-only.
pub fn require_non_blank(
    value: Option<&str>,
    field_name: &str,
) -> std::result::Result<(), ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::Required {
            field: field_name.to_string(),
        }),
    }
}

/// Fails if `amount` is zero or negative.
pub fn require_positive_amount(amount: Decimal) -> std::result::Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(())
}

/// Fails if `date` is absent or later than today.
pub fn require_not_future_date(
    date: Option<NaiveDate>,
) -> std::result::Result<(), ValidationError> {
    require_not_after(date, time_utils::today())
}

/// Same as [`require_not_future_date`] with an explicit reference date.
/// Dates equal to `today` pass.
pub fn require_not_after(
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> std::result::Result<(), ValidationError> {
    let date = date.ok_or(ValidationError::MissingDate)?;
    if time_utils::is_after(date, today) {
        return Err(ValidationError::FutureDate);
    }
    Ok(())
}
