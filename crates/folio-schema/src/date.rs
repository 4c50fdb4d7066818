//! Calendar date coercion from authored text.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Date-only layouts, tried in order. Slashed day-first dates are read
/// month-first (`05/01/2023` is May 1).
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%A, %B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Human-readable description of the accepted forms, used in violations.
pub const DATE_EXPECTATION: &str = "date such as 2023-05-01, 2023/05/01 or May 1, 2023";

/// Parse a date written in any of the accepted textual forms.
///
/// Timestamps keep the calendar date as written, ignoring any offset.
/// Month-precision dates (`2023-05`, `May 2023`) resolve to the first of the
/// month.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive());
    }

    // `May 2023` also matches `%B %d %Y` as May 20, year 23.
    parse_month(text)
        .or_else(|| {
            DATE_FORMATS.iter().find_map(|format| {
                NaiveDate::parse_from_str(text, format)
                    .ok()
                    .filter(has_full_year)
            })
        })
        .or_else(|| {
            DATETIME_FORMATS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(text, format)
                    .ok()
                    .map(|datetime| datetime.date())
                    .filter(has_full_year)
            })
        })
}

/// chrono reads `%Y` greedily, so `23` parses as year 23.
fn has_full_year(date: &NaiveDate) -> bool {
    (1000..=9999).contains(&date.year())
}

fn parse_month(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("1 {text}"), "%d %B %Y"))
        .ok()
        .filter(has_full_year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 1).expect("valid date")
    }

    #[test]
    fn test_equivalent_forms_normalize_to_same_date() {
        for text in [
            "2023-05-01",
            "2023/05/01",
            "2023.05.01",
            "05/01/2023",
            "5/1/2023",
            "May 1, 2023",
            "May 01 2023",
            "may 1, 2023",
            "1 May 2023",
            "1 May, 2023",
            "Monday, May 1, 2023",
            "2023-05-01T09:30:00Z",
            "2023-05-01T23:30:00-07:00",
            "2023-05-01T09:30:00",
            "2023-05-01 09:30:00",
            "  2023-05-01  ",
        ] {
            assert_eq!(parse_date(text), Some(may_first()), "failed on {text:?}");
        }
    }

    #[test]
    fn test_month_precision() {
        assert_eq!(parse_date("2023-05"), Some(may_first()));
        assert_eq!(parse_date("May 2023"), Some(may_first()));
        assert_eq!(parse_date("may 2023"), Some(may_first()));
        assert_eq!(parse_date("Jan 2024"), NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_short_years_rejected() {
        for text in ["May 20 23", "5/1/23", "23-05-01", "May 1, 99"] {
            assert_eq!(parse_date(text), None, "accepted {text:?}");
        }
    }

    #[test]
    fn test_unparseable_dates() {
        for text in ["", "yesterday", "2023-13-01", "2023-02-30", "01.05", "Q2 2023"] {
            assert_eq!(parse_date(text), None, "accepted {text:?}");
        }
    }
}
