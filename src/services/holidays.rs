use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveTime, Offset, TimeZone, Utc};

use crate::services::calendar::HolidaySource;

/// Public-facing accessor over the holiday feed.
///
/// Applies default date ranges and stamps a fixed UTC offset onto the
/// returned dates. Never fails outward: any error yields an empty list.
pub struct HolidayCalendar {
    source: Arc<dyn HolidaySource>,
}

impl HolidayCalendar {
    pub fn new(source: Arc<dyn HolidaySource>) -> Self {
        Self { source }
    }

    /// Public holiday dates in the given range, as midnight instants carrying
    /// the given UTC offset.
    ///
    /// Defaults when arguments are omitted:
    /// - start: first day of the month one month before today (UTC),
    /// - end: first day of the month seven months after today (UTC),
    /// - offset: UTC.
    ///
    /// The offset is stamped onto each date, not converted: a holiday on
    /// `2024-06-06` with offset +05:30 comes back as
    /// `2024-06-06T00:00:00+05:30`, the same calendar day the provider
    /// reported.
    pub async fn public_holiday_dates(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        utc_offset_minutes: Option<i32>,
    ) -> Vec<DateTime<FixedOffset>> {
        match self
            .try_public_holiday_dates(start, end, utc_offset_minutes)
            .await
        {
            Ok(dates) => dates,
            Err(error) => {
                tracing::error!(%error, "an error occurred while fetching public holidays via the calendar API");
                Vec::new()
            }
        }
    }

    async fn try_public_holiday_dates(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        utc_offset_minutes: Option<i32>,
    ) -> Result<Vec<DateTime<FixedOffset>>> {
        let today = Utc::now().date_naive();
        let start = match start {
            Some(date) => date,
            None => first_of_month(
                today
                    .checked_sub_months(Months::new(1))
                    .ok_or_else(|| anyhow!("date overflow computing the default start"))?,
            ),
        };
        let end = match end {
            Some(date) => date,
            None => first_of_month(
                today
                    .checked_add_months(Months::new(7))
                    .ok_or_else(|| anyhow!("date overflow computing the default end"))?,
            ),
        };

        let offset = offset_from_minutes(utc_offset_minutes);
        let raw_dates = self
            .source
            .fetch_holidays(
                start.and_time(NaiveTime::MIN).and_utc(),
                end.and_time(NaiveTime::MIN).and_utc(),
            )
            .await?;

        let mut dates = Vec::with_capacity(raw_dates.len());
        for value in raw_dates {
            match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
                Ok(date) => {
                    if let Some(stamped) = offset
                        .from_local_datetime(&date.and_time(NaiveTime::MIN))
                        .single()
                    {
                        dates.push(stamped);
                    }
                }
                Err(error) => {
                    tracing::warn!(value = %value, %error, "skipping unparseable holiday date from the calendar API");
                }
            }
        }

        Ok(dates)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // The first of the month always exists.
    date.with_day(1).unwrap_or(date)
}

fn offset_from_minutes(minutes: Option<i32>) -> FixedOffset {
    let Some(minutes) = minutes else {
        return Utc.fix();
    };

    match minutes.checked_mul(60).and_then(FixedOffset::east_opt) {
        Some(offset) => offset,
        None => {
            tracing::warn!(minutes, "UTC offset out of range; stamping UTC instead");
            Utc.fix()
        }
    }
}
