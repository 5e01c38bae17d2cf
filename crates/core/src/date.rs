//! Lenient date parsing and canonical formatting.
//!
//! The profile service speaks `yyyy-MM-dd`; humans type all sorts of
//! things. Parsing goes through [`chrono::NaiveDate`] calendar fields,
//! never through a timestamp, so a date-only input can never shift by a
//! day when the machine's timezone differs from the server's.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date format used on the wire.
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format used for read-only display.
pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Day-first formats accepted from human input.
const HUMAN_DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%d/%m/%Y", "%d %m %Y"];

/// Parse a date from any reasonable human or machine format.
///
/// Accepts `yyyy-MM-dd`, `dd-MM-yyyy` / `dd/MM/yyyy` / `dd MM yyyy`, or
/// a full timestamp (RFC 3339, or a bare `yyyy-MM-ddTHH:MM:SS`). A
/// timestamp contributes the calendar date it names in its own offset.
/// Returns `None` for empty or unparseable input.
#[must_use]
pub fn parse_flexible(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, API_DATE_FORMAT) {
        return Some(date);
    }

    for format in HUMAN_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }

    None
}

/// Convert any reasonable input to the API's `yyyy-MM-dd` string.
///
/// Returns `None` if the input is empty or unparseable; callers decide
/// whether that means "omit the field" or "reject the input".
#[must_use]
pub fn to_api_date(s: &str) -> Option<String> {
    parse_flexible(s).map(|d| d.format(API_DATE_FORMAT).to_string())
}

/// Coerce a service-supplied date to `yyyy-MM-dd`, or `""` on failure.
#[must_use]
pub fn from_api_date(s: &str) -> String {
    to_api_date(s).unwrap_or_default()
}

/// Format for read-only display as `dd-MM-yyyy`, or `""` on failure.
#[must_use]
pub fn to_display_date(s: &str) -> String {
    parse_flexible(s)
        .map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_format() {
        assert_eq!(to_api_date("2020-01-31"), Some("2020-01-31".to_string()));
    }

    #[test]
    fn parses_day_first_formats() {
        assert_eq!(to_api_date("31-01-2020"), Some("2020-01-31".to_string()));
        assert_eq!(to_api_date("31/01/2020"), Some("2020-01-31".to_string()));
        assert_eq!(to_api_date("31 01 2020"), Some("2020-01-31".to_string()));
    }

    #[test]
    fn parses_timestamps() {
        assert_eq!(
            to_api_date("2000-01-02T00:00:00Z"),
            Some("2000-01-02".to_string())
        );
        assert_eq!(
            to_api_date("2000-01-02T10:30:00+05:30"),
            Some("2000-01-02".to_string())
        );
        assert_eq!(
            to_api_date("2000-01-02T23:59:59"),
            Some("2000-01-02".to_string())
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(to_api_date("not a date"), None);
        assert_eq!(to_api_date(""), None);
        assert_eq!(to_api_date("   "), None);
        assert_eq!(to_api_date("31-13-2020"), None);
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        assert_eq!(to_api_date("2019-02-29"), None);
        assert_eq!(to_api_date("2020-02-29"), Some("2020-02-29".to_string()));
    }

    #[test]
    fn from_api_date_is_empty_on_failure() {
        assert_eq!(from_api_date("2020-01-31"), "2020-01-31");
        assert_eq!(from_api_date("nope"), "");
    }

    #[test]
    fn display_format() {
        assert_eq!(to_display_date("2020-01-31"), "31-01-2020");
        assert_eq!(to_display_date("not a date"), "");
        assert_eq!(to_display_date(""), "");
    }

    #[test]
    fn display_accepts_human_input_too() {
        // Same lenient parse on both directions.
        assert_eq!(to_display_date("31/01/2020"), "31-01-2020");
    }
}
