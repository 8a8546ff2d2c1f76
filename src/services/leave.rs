use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::{
    error::HolidayFetchError,
    services::calendar::HolidaySource,
    utils::time::{calculate_total_days, calculate_weekend_days, is_weekend},
};

/// Computes leave-day totals for an absence between two dates.
pub struct LeaveCalculator {
    source: Arc<dyn HolidaySource>,
}

impl LeaveCalculator {
    pub fn new(source: Arc<dyn HolidaySource>) -> Self {
        Self { source }
    }

    /// Number of distinct public holidays in the range that land on a
    /// weekday. Holidays falling on a weekend do not consume leave, so they
    /// are dropped; exact duplicate dates from the provider collapse to one.
    ///
    /// Fetch failures propagate to the caller.
    pub async fn public_holiday_count(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u32, HolidayFetchError> {
        let time_min = start.and_time(NaiveTime::MIN).and_utc();
        let time_max = end.and_time(NaiveTime::MIN).and_utc();
        let raw_dates = self.source.fetch_holidays(time_min, time_max).await?;

        let mut holidays = BTreeSet::new();
        for value in raw_dates {
            match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
                Ok(date) if is_weekend(date) => {}
                Ok(date) => {
                    holidays.insert(date);
                }
                Err(error) => {
                    tracing::warn!(value = %value, %error, "skipping unparseable holiday date from the calendar API");
                }
            }
        }

        Ok(holidays.len() as u32)
    }

    /// Total leave days consumed by an absence from `start` to `end`,
    /// inclusive: elapsed days minus weekend days minus weekday public
    /// holidays.
    ///
    /// When the holiday data cannot be fetched the calculation proceeds with
    /// zero holidays rather than failing; the degradation is logged. The
    /// result is not floored at zero, so a reversed range yields a
    /// meaningless negative value.
    pub async fn total_leave_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let public_holidays = match self.public_holiday_count(start, end).await {
            Ok(count) => i64::from(count),
            Err(error) => {
                tracing::error!(%error, "an error occurred while fetching public holidays; counting none");
                0
            }
        };

        calculate_total_days(start, end) - calculate_weekend_days(start, end) - public_holidays
    }
}
