//! Inclusive span between two dates in a period unit.

use chrono::{Datelike, NaiveDate};
use ledgerlens_core::models::Period;

/// Number of periods covered by `[first, last]`, counting both ends.
///
/// Always at least 1 when `first <= last`.
pub fn period_span(first: NaiveDate, last: NaiveDate, per: Period) -> u32 {
    let span = match per {
        Period::Month => {
            let years = i64::from(last.year()) - i64::from(first.year());
            let months = i64::from(last.month()) - i64::from(first.month());
            years * 12 + months + 1
        }
        Period::Day => (last - first).num_days() + 1,
    };
    u32::try_from(span.max(1)).unwrap_or(u32::MAX)
}
