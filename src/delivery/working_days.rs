//! Delivery date projection on a Monday–Friday calendar.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::PricingConfig;
use crate::error::{QuoteError, Result};

/// Working days needed to deliver an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverySchedule {
    pub production_days: u32,
    pub buffer_days: u32,
}

impl DeliverySchedule {
    /// Compute the schedule for `hours` of production.
    pub fn for_hours(hours: f64, config: &PricingConfig) -> Result<Self> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(QuoteError::InvalidProductionTime { hours });
        }

        let production = (hours / config.hours_per_working_day).ceil();
        let buffer = (production * config.buffer_ratio).ceil();
        let (Some(production_days), Some(buffer_days)) =
            (whole_days(production), whole_days(buffer))
        else {
            return Err(QuoteError::DeliveryOutOfRange { hours });
        };

        Ok(Self {
            production_days,
            buffer_days: buffer_days.max(config.min_buffer_days),
        })
    }

    /// Production plus buffer.
    pub fn total_days(&self) -> u64 {
        u64::from(self.production_days) + u64::from(self.buffer_days)
    }
}

/// A non-negative whole day count that fits in `u32`.
fn whole_days(days: f64) -> Option<u32> {
    (days.is_finite() && (0.0..=u32::MAX as f64).contains(&days)).then_some(days as u32)
}

/// Check if a date falls Monday through Friday.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Walk forward from `start`, counting only working days.
///
/// `start` itself is never counted. Returns `None` past [`NaiveDate::MAX`].
pub fn add_working_days(start: NaiveDate, days: u64) -> Option<NaiveDate> {
    let mut date = start;
    let mut remaining = days;

    while remaining > 0 {
        date = date.checked_add_days(Days::new(1))?;
        if !is_working_day(date) {
            continue;
        }
        remaining -= 1;

        // From a working day, five working days is exactly one calendar week.
        let weeks = remaining / 5;
        if weeks > 0 {
            date = date.checked_add_days(Days::new(weeks.checked_mul(7)?))?;
            remaining -= weeks * 5;
        }
    }

    Some(date)
}

/// Project the delivery date for `hours` of production starting on `start`.
pub fn project_delivery(hours: f64, start: NaiveDate, config: &PricingConfig) -> Result<NaiveDate> {
    let schedule = DeliverySchedule::for_hours(hours, config)?;
    add_working_days(start, schedule.total_days())
        .ok_or(QuoteError::DeliveryOutOfRange { hours })
}

/// Like [`project_delivery`], keeping the time of day of `now`.
pub fn project_delivery_at<Tz: TimeZone>(
    hours: f64,
    now: DateTime<Tz>,
    config: &PricingConfig,
) -> Result<DateTime<Tz>> {
    let start = now.date_naive();
    let target = project_delivery(hours, start, config)?;
    let days = (target - start).num_days().max(0) as u64;
    now.checked_add_days(Days::new(days))
        .ok_or(QuoteError::DeliveryOutOfRange { hours })
}
