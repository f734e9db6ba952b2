//! Timestamp utilities
//!
//! Show start times are naive local timestamps: the operator types them in
//! local time and "upcoming" is judged against the local wall clock.

use chrono::{DateTime, Local, NaiveDateTime, Timelike};

use crate::{Error, Result};

/// Canonical text form used in forms and stored rows
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted input layouts, tried in order
const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Current local wall-clock time, truncated to whole seconds
pub fn now() -> NaiveDateTime {
    let local = Local::now().naive_local();
    local.with_nanosecond(0).unwrap_or(local)
}

/// Parse a show start time typed into a form
///
/// Accepts `YYYY-MM-DD HH:MM[:SS]`, the `T`-separated layout produced by
/// `datetime-local` inputs, and RFC 3339 (converted to local time).
pub fn parse_start_time(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();

    for format in INPUT_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Local).naive_local());
    }

    Err(Error::InvalidInput(format!("Unrecognized start time: {}", trimmed)))
}

/// Display layouts for show start times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Sunday April, 1, 2035 at 8:00PM`
    Full,
    /// `Sun 04, 01, 2035 8:00PM`
    Medium,
}

/// Render a start time for display
pub fn format_datetime(value: &NaiveDateTime, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
        DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
    };
    value.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2035, 4, 1)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_now_has_no_fractional_seconds() {
        assert_eq!(now().nanosecond(), 0);
    }

    #[test]
    fn test_parse_space_separated() {
        assert_eq!(parse_start_time("2035-04-01 20:00:00").unwrap(), sample());
        assert_eq!(parse_start_time("2035-04-01 20:00").unwrap(), sample());
    }

    #[test]
    fn test_parse_datetime_local_input() {
        assert_eq!(parse_start_time("2035-04-01T20:00").unwrap(), sample());
        assert_eq!(parse_start_time(" 2035-04-01T20:00:00 ").unwrap(), sample());
    }

    #[test]
    fn test_parse_rfc3339_is_accepted() {
        assert!(parse_start_time("2035-04-01T20:00:00.000Z").is_ok());
    }

    #[test]
    fn test_parse_garbage_is_invalid_input() {
        let err = parse_start_time("next tuesday").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_format_full() {
        assert_eq!(
            format_datetime(&sample(), DateFormat::Full),
            "Sunday April, 1, 2035 at 8:00PM"
        );
    }

    #[test]
    fn test_format_medium() {
        assert_eq!(
            format_datetime(&sample(), DateFormat::Medium),
            "Sun 04, 01, 2035 8:00PM"
        );
    }
}
