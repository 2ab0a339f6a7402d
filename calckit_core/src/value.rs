//! # Field Values
//!
//! Two layers of values flow through an evaluation:
//!
//! - [`RawValue`] - whatever the form layer hands over (a string, a number,
//!   a boolean, or nothing at all). Deserializes from plain JSON scalars.
//! - [`Value`] - the typed result of coercing a raw value against the
//!   declared [`FieldKind`](crate::field::FieldKind). Numeric, date and time
//!   values carry an explicit "blank/invalid" sentinel (`None`).
//!
//! ## Example
//!
//! ```rust
//! use calckit_core::value::RawValue;
//!
//! let raw: RawValue = serde_json::from_str("\"1.75\"").unwrap();
//! assert_eq!(raw, RawValue::Text("1.75".to_string()));
//!
//! let raw: RawValue = serde_json::from_str("null").unwrap();
//! assert!(raw.is_blank());
//! ```

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::precision::format_number;

/// A value exactly as supplied by the form layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Nothing entered (JSON `null`)
    #[default]
    Empty,
    /// A checkbox state
    Bool(bool),
    /// A number already parsed by the form layer
    Number(f64),
    /// Any typed-in or selected text
    Text(String),
}

impl RawValue {
    /// True when the user supplied nothing meaningful (empty or whitespace)
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::Bool(_) | RawValue::Number(_) => false,
        }
    }

    /// Text form of the value, as a form field would display it
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Empty => String::new(),
            RawValue::Bool(b) => b.to_string(),
            RawValue::Number(n) => format_number(*n),
            RawValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// A coerced, typed field value.
///
/// `None` inside `Number`, `Date` and `Time` is the sentinel for blank or
/// unparsable input. Computations decide what the sentinel means for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    Number(Option<f64>),
    Text(String),
    Choice(String),
    Flag(bool),
    Date(Option<NaiveDate>),
    Time(Option<NaiveTime>),
}

impl Value {
    /// Text form used by equality conditions and debugging output
    pub fn as_text(&self) -> String {
        match self {
            Value::Number(Some(n)) => format_number(*n),
            Value::Text(s) | Value::Choice(s) => s.clone(),
            Value::Flag(b) => b.to_string(),
            Value::Date(Some(d)) => d.format("%Y-%m-%d").to_string(),
            Value::Time(Some(t)) => t.format("%H:%M:%S").to_string(),
            Value::Number(None) | Value::Date(None) | Value::Time(None) => String::new(),
        }
    }

    /// True for the blank/invalid sentinels and for empty text
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Number(n) => n.is_none(),
            Value::Date(d) => d.is_none(),
            Value::Time(t) => t.is_none(),
            Value::Text(s) | Value::Choice(s) => s.trim().is_empty(),
            Value::Flag(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}
