//! Date and duration display formatting

use chrono::{DateTime, NaiveDate};

/// Format a "YYYY-MM-DD" day key as e.g. "7 Nov 2023"
///
/// Falls back to the raw key when it does not parse.
pub fn format_day_key(day: &str) -> String {
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%-d %b %Y").to_string(),
        Err(_) => day.to_string(),
    }
}

/// Format a unix timestamp as e.g. "7 Nov 2023" (UTC)
pub fn format_uts(uts: i64) -> String {
    match DateTime::from_timestamp(uts, 0) {
        Some(dt) => dt.format("%-d %b %Y").to_string(),
        None => "-".to_string(),
    }
}

/// Format seconds as "m:ss"
pub fn format_minutes_seconds(seconds: f64) -> String {
    let total = seconds.max(0.0);
    let minutes = (total / 60.0).floor() as i64;
    let secs = (total % 60.0).round() as i64;
    // 59.6 s rounds up to the next minute, not to ":60"
    if secs == 60 {
        return format!("{}:00", minutes + 1);
    }
    format!("{}:{:02}", minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_day_key() {
        assert_eq!(format_day_key("2023-11-07"), "7 Nov 2023");
        assert_eq!(format_day_key("not-a-day"), "not-a-day");
    }

    #[test]
    fn test_format_uts() {
        // 2023-11-14 22:13:20 UTC
        assert_eq!(format_uts(1700000000), "14 Nov 2023");
    }

    #[test]
    fn test_format_minutes_seconds() {
        assert_eq!(format_minutes_seconds(225.0), "3:45");
        assert_eq!(format_minutes_seconds(0.0), "0:00");
        assert_eq!(format_minutes_seconds(59.6), "1:00");
        assert_eq!(format_minutes_seconds(3723.0), "62:03");
    }
}
