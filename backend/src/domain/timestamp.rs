//! Parsing and formatting of booking timestamps.
//!
//! Bookings use naive local wall-clock time. Inputs that carry an explicit UTC
//! offset are converted to local time, and sub-second precision is dropped so
//! persisted values always read `YYYY-MM-DDTHH:MM:SS`. Years outside
//! `1..=9999` are rejected.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};

const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Parse an ISO-8601 date-time, with or without offset.
///
/// # Examples
/// ```
/// use study_rooms::domain::timestamp::{format_datetime, parse_datetime};
///
/// let parsed = parse_datetime("2025-11-16T13:00").expect("valid timestamp");
/// assert_eq!(format_datetime(parsed), "2025-11-16T13:00:00");
/// assert!(parse_datetime("16/11/2025 13:00").is_none());
/// ```
#[must_use]
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|aware| aware.with_timezone(&Local).naive_local())
        })
        .filter(|naive| SUPPORTED_YEARS.contains(&naive.year()))?;
    Some(naive.trunc_subsecs(0))
}

/// Combine a `YYYY-MM-DD` date with an `HH:MM` or `HH:MM:SS` time.
#[must_use]
pub fn combine_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .filter(|date| SUPPORTED_YEARS.contains(&date.year()))?;
    let time = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(time.trim(), format).ok())?;
    Some(date.and_time(time))
}

/// Render a timestamp in the persisted wire form.
#[must_use]
pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        combine_date_time(date, time).expect("valid fixture timestamp")
    }

    #[rstest]
    #[case("2025-11-16T13:00:00")]
    #[case("2025-11-16T13:00")]
    #[case("2025-11-16 13:00:00")]
    #[case("2025-11-16T13:00:00.750")]
    #[case(" 2025-11-16T13:00 ")]
    fn parses_naive_forms(#[case] raw: &str) {
        assert_eq!(parse_datetime(raw), Some(at("2025-11-16", "13:00")));
    }

    #[rstest]
    fn converts_offsets_to_local() {
        let raw = "2025-11-16T13:00:00+00:00";
        let expected = DateTime::parse_from_rfc3339(raw)
            .expect("valid rfc3339")
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(parse_datetime(raw), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("tomorrow")]
    #[case("2025-13-01T10:00")]
    #[case("2025-11-16")]
    #[case("+262142-12-31T10:00:00")]
    #[case("0000-01-01T10:00:00")]
    fn rejects_garbage(#[case] raw: &str) {
        assert!(parse_datetime(raw).is_none());
    }

    #[rstest]
    #[case("2025-11-16", "13:00", true)]
    #[case("2025-11-16", "13:00:30", true)]
    #[case("2025-11-16", "25:00", false)]
    #[case("2025-02-30", "13:00", false)]
    #[case("16-11-2025", "13:00", false)]
    #[case("+262142-12-31", "10:00", false)]
    #[case("9999-12-31", "23:59", true)]
    fn combines_date_and_time(#[case] date: &str, #[case] time: &str, #[case] ok: bool) {
        assert_eq!(combine_date_time(date, time).is_some(), ok);
    }

    #[rstest]
    fn formats_without_fraction() {
        assert_eq!(format_datetime(at("2025-01-02", "03:04:05")), "2025-01-02T03:04:05");
    }
}
