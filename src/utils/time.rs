//! Time utilities: parsing `--at` values, local conversion and clipped durations.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

/// Attach a local timezone to a naive date/time, picking the earlier
/// instant when the wall clock time is ambiguous (DST fall-back).
pub fn to_local(dt: NaiveDateTime) -> AppResult<DateTime<Local>> {
    dt.and_local_timezone(Local)
        .earliest()
        .ok_or_else(|| AppError::InvalidTime(dt.to_string()))
}

/// Local midnight at the beginning of `date`.
pub fn start_of_day(date: NaiveDate) -> AppResult<DateTime<Local>> {
    to_local(date.and_time(NaiveTime::MIN))
}

/// Parse a `--at` argument: `HH:MM` (today) or `YYYY-MM-DD HH:MM`.
pub fn parse_at(s: &str, today: NaiveDate) -> AppResult<DateTime<Local>> {
    let s = s.trim();
    if let Some(t) = parse_time(s) {
        return to_local(today.and_time(t));
    }
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return to_local(dt);
        }
    }
    Err(AppError::InvalidTime(s.to_string()))
}

/// Resolve an optional `--at` argument, defaulting to now.
pub fn parse_optional_at(input: Option<&String>) -> AppResult<DateTime<Local>> {
    match input {
        Some(s) => parse_at(s, Local::now().date_naive()),
        None => Ok(Local::now()),
    }
}

/// Length of `[start, end]` after truncating it to its overlap with the
/// window `[min, max]`. Absent bounds leave that side open; an empty overlap
/// yields zero.
pub fn clipped_duration(
    start: DateTime<Local>,
    end: DateTime<Local>,
    min: Option<DateTime<Local>>,
    max: Option<DateTime<Local>>,
) -> TimeDelta {
    let start = min.map_or(start, |m| start.max(m));
    let end = max.map_or(end, |m| end.min(m));
    if end > start {
        end - start
    } else {
        TimeDelta::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 6, 16, h, m, 0)
            .single()
            .expect("valid local time")
    }

    #[test]
    fn clipped_duration_never_exceeds_window() {
        let d = clipped_duration(at(8, 0), at(18, 0), Some(at(9, 0)), Some(at(10, 0)));
        assert_eq!(d, TimeDelta::hours(1));

        let d = clipped_duration(at(8, 0), at(9, 0), Some(at(10, 0)), Some(at(11, 0)));
        assert_eq!(d, TimeDelta::zero());

        let d = clipped_duration(at(8, 0), at(9, 30), None, None);
        assert_eq!(d, TimeDelta::minutes(90));
    }

    #[test]
    fn parse_at_accepts_time_and_date_time() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        assert_eq!(parse_at("09:00", today).unwrap(), at(9, 0));
        assert_eq!(parse_at("2025-06-16 10:30", today).unwrap(), at(10, 30));
        assert!(parse_at("soon", today).is_err());
    }
}
