// src/data_input/datetime.rs

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{SensorError, SensorResult};

const DAY_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parse the `day` column.
pub fn parse_day(day: &str) -> SensorResult<NaiveDate> {
    let trimmed = day.trim();
    DAY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| SensorError::InvalidDay(trimmed.to_string()))
}

/// Parse the `time` column as a duration since midnight.
///
/// Accepts `HH:MM:SS[.fraction]`, `HH:MM`, and the `N days HH:MM:SS` form.
/// Hours may exceed 23; the result simply rolls into the next day.
pub fn parse_time_of_day(time: &str) -> SensorResult<Duration> {
    let trimmed = time.trim();
    let invalid = || SensorError::InvalidTime(trimmed.to_string());

    let (days, clock) = match trimmed.split_once("day") {
        Some((days, rest)) => {
            let days: i64 = days.trim().parse().map_err(|_| invalid())?;
            let clock = rest.trim_start_matches('s').trim();
            (days, clock)
        }
        None => (0, trimmed),
    };

    let mut fields = clock.split(':');
    let hours: i64 = fields.next().and_then(|h| h.trim().parse().ok()).ok_or_else(invalid)?;
    let minutes: i64 = fields.next().and_then(|m| m.trim().parse().ok()).ok_or_else(invalid)?;
    let seconds: f64 = match fields.next() {
        Some(s) => s.trim().parse().map_err(|_| invalid())?,
        None => 0.0,
    };
    if fields.next().is_some()
        || hours < 0
        || !(0..60).contains(&minutes)
        || !(0.0..60.0).contains(&seconds)
    {
        return Err(invalid());
    }

    let micros = (seconds * 1_000_000.0).round() as i64;
    Duration::try_days(days)
        .zip(Duration::try_hours(hours))
        .and_then(|(d, h)| d.checked_add(&h))
        .and_then(|offset| offset.checked_add(&Duration::minutes(minutes)))
        .and_then(|offset| offset.checked_add(&Duration::microseconds(micros)))
        .ok_or_else(invalid)
}

/// Combine the `day` and `time` columns into a single timestamp.
pub fn prep_datetime(day: &str, time: &str) -> SensorResult<NaiveDateTime> {
    let date = parse_day(day)?;
    let offset = parse_time_of_day(time)?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| SensorError::InvalidDay(day.trim().to_string()))?;
    midnight
        .checked_add_signed(offset)
        .ok_or_else(|| SensorError::InvalidTime(time.trim().to_string()))
}
