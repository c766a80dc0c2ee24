use chrono::{Local, NaiveDate};

/// The calendar date used as "now" when checking that a date is not in the future.
///
/// Dates are compared in the machine's local timezone, which is the timezone
/// the user enters expense dates in.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Returns true if `date` falls strictly after `reference`.
pub fn is_after(date: NaiveDate, reference: NaiveDate) -> bool {
    date > reference
}
