use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Returns true when the date falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Inclusive day count between two dates.
///
/// Assumes `start <= end`; a reversed range yields a non-positive count.
pub fn calculate_total_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Number of weekend days between two dates, inclusive on both ends.
pub fn calculate_weekend_days(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut weekend_days = 0;
    let mut cursor = start;
    while cursor <= end {
        if is_weekend(cursor) {
            weekend_days += 1;
        }
        cursor += Duration::days(1);
    }

    weekend_days
}
