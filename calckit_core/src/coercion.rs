//! # Value Coercion
//!
//! Converts raw form values into the typed [`Value`] a computation expects.
//! Coercion is total: every raw value maps to a typed value or to the kind's
//! blank/invalid sentinel. Nothing here returns an error.
//!
//! Dates and times are read on the *local* calendar (`NaiveDate` /
//! `NaiveTime`), never shifted through UTC, so "2024-03-10" is always the
//! tenth of March regardless of where the process runs.
//!
//! ## Example
//!
//! ```rust
//! use calckit_core::coercion::{coerce, parse_number_list};
//! use calckit_core::field::FieldKind;
//! use calckit_core::value::{RawValue, Value};
//!
//! assert_eq!(coerce(FieldKind::Number, &RawValue::from(" 1.75 ")), Value::Number(Some(1.75)));
//! assert_eq!(coerce(FieldKind::Number, &RawValue::from("abc")), Value::Number(None));
//! assert_eq!(parse_number_list("12, 18 x 24"), vec![12.0, 18.0, 24.0]);
//! ```

use chrono::{NaiveDate, NaiveTime};

use crate::field::FieldKind;
use crate::value::{RawValue, Value};

/// Accepted calendar date layouts, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Accepted time-of-day layouts, tried in order
const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p", "%I:%M:%S %p"];

/// Coerce a raw value into the typed form required by `kind`.
pub fn coerce(kind: FieldKind, raw: &RawValue) -> Value {
    match kind {
        FieldKind::Number => Value::Number(coerce_number(raw)),
        FieldKind::Text => Value::Text(raw.as_text()),
        FieldKind::Select => Value::Choice(raw.as_text()),
        FieldKind::Checkbox => Value::Flag(is_truthy(raw)),
        FieldKind::Date => Value::Date(match raw {
            RawValue::Text(s) => parse_date(s),
            _ => None,
        }),
        FieldKind::Time => Value::Time(match raw {
            RawValue::Text(s) => parse_time(s),
            _ => None,
        }),
    }
}

fn coerce_number(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Number(n) if n.is_finite() => Some(*n),
        RawValue::Number(_) | RawValue::Empty | RawValue::Bool(_) => None,
        RawValue::Text(s) => parse_number(s),
    }
}

/// Parse a single number, returning `None` for blank, malformed or
/// non-finite text ("inf" and "NaN" are rejected).
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Tokenize a delimited list (commas, semicolons, whitespace) and keep every
/// token that parses as a number. Unparsable tokens are discarded.
pub fn parse_number_list(text: &str) -> Vec<f64> {
    text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter_map(parse_number)
        .collect()
}

/// Map truthy/falsy raw forms onto a strict boolean.
///
/// Truthy: `true`, any non-zero number, and the strings `true`, `1`, `yes`,
/// `y`, `on`, `checked` (case-insensitive). Everything else is `false`.
pub fn is_truthy(raw: &RawValue) -> bool {
    match raw {
        RawValue::Empty => false,
        RawValue::Bool(b) => *b,
        RawValue::Number(n) => *n != 0.0 && !n.is_nan(),
        RawValue::Text(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "y" | "on" | "checked"
        ),
    }
}

/// Parse a calendar date on the local calendar.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Datetime-local strings carry a time part we don't need
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Parse a time of day (24-hour or 12-hour with AM/PM).
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.to_ascii_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&normalized, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_coercion() {
        assert_eq!(coerce(FieldKind::Number, &RawValue::from("42")), Value::Number(Some(42.0)));
        assert_eq!(coerce(FieldKind::Number, &RawValue::from(-3.5)), Value::Number(Some(-3.5)));
        assert_eq!(coerce(FieldKind::Number, &RawValue::from("")), Value::Number(None));
        assert_eq!(coerce(FieldKind::Number, &RawValue::from("12abc")), Value::Number(None));
        assert_eq!(coerce(FieldKind::Number, &RawValue::from("NaN")), Value::Number(None));
        assert_eq!(coerce(FieldKind::Number, &RawValue::Number(f64::INFINITY)), Value::Number(None));
        assert_eq!(coerce(FieldKind::Number, &RawValue::Empty), Value::Number(None));
    }

    #[test]
    fn test_text_and_select_pass_through() {
        assert_eq!(
            coerce(FieldKind::Text, &RawValue::from(" a, b ")),
            Value::Text(" a, b ".to_string())
        );
        assert_eq!(coerce(FieldKind::Select, &RawValue::from("kg")), Value::Choice("kg".to_string()));
        assert_eq!(coerce(FieldKind::Select, &RawValue::from(6.0)), Value::Choice("6".to_string()));
    }

    #[test]
    fn test_number_list() {
        assert_eq!(parse_number_list("12, 18, 24"), vec![12.0, 18.0, 24.0]);
        assert_eq!(parse_number_list("1;2  3\n4"), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(parse_number_list("5, five, , 6"), vec![5.0, 6.0]);
        assert!(parse_number_list("").is_empty());
    }

    #[test]
    fn test_truthy() {
        assert!(is_truthy(&RawValue::from(true)));
        assert!(is_truthy(&RawValue::from("Yes")));
        assert!(is_truthy(&RawValue::from("on")));
        assert!(is_truthy(&RawValue::from(2.0)));
        assert!(!is_truthy(&RawValue::from("no")));
        assert!(!is_truthy(&RawValue::from("")));
        assert!(!is_truthy(&RawValue::from(0.0)));
        assert!(!is_truthy(&RawValue::Empty));
    }

    #[test]
    fn test_date_parsing_is_local_calendar() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 10);
        assert_eq!(parse_date("2024-03-10"), expected);
        assert_eq!(parse_date("03/10/2024"), expected);
        assert_eq!(parse_date("2024-03-10T23:30"), expected);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(coerce(FieldKind::Date, &RawValue::from(20240310.0)), Value::Date(None));
    }

    #[test]
    fn test_time_parsing() {
        assert_eq!(parse_time("17:30"), NaiveTime::from_hms_opt(17, 30, 0));
        assert_eq!(parse_time("5:30 pm"), NaiveTime::from_hms_opt(17, 30, 0));
        assert_eq!(parse_time("09:15:20"), NaiveTime::from_hms_opt(9, 15, 20));
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(coerce(FieldKind::Time, &RawValue::Empty), Value::Time(None));
    }
}
