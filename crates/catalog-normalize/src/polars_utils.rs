//! Polars date helpers.
//!
//! Polars stores a Date as days since the Unix epoch; these convert
//! between that representation and calendar dates.

use chrono::{Datelike, NaiveDate};
use polars::prelude::AnyValue;

/// Days from 0001-01-01 (CE) to the Unix epoch, the origin of Polars dates.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Converts a Date cell to a calendar date. Null or non-date cells give `None`.
pub fn any_to_date(value: AnyValue<'_>) -> Option<NaiveDate> {
    match value {
        AnyValue::Date(days) => date_from_days(days),
        _ => None,
    }
}

/// Converts Polars' days-since-epoch representation to a calendar date.
pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// Converts a calendar date to Polars' days-since-epoch representation.
pub fn days_from_date(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}
