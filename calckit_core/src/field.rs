//! # Field Schema
//!
//! An [`InputField`] describes one user-entry point of a calculator: its
//! identifier, label, value kind, optional default, unit, choices and
//! visibility condition. Fields are static data built once with the
//! builder-style constructors below.
//!
//! ## Example
//!
//! ```rust
//! use calckit_core::condition::Condition;
//! use calckit_core::field::{Choice, FieldKind, InputField};
//!
//! let system = InputField::select("unit_system", "Unit System", vec![
//!     Choice::new("Metric", "metric"),
//!     Choice::new("Imperial", "imperial"),
//! ])
//! .default_value("metric");
//!
//! let height = InputField::number("height", "Height")
//!     .default_value(175.0)
//!     .unit("cm")
//!     .visible_when(Condition::equals("unit_system", "metric"));
//!
//! assert_eq!(height.kind, FieldKind::Number);
//! assert!(height.is_conditional());
//! assert!(!system.is_conditional());
//! ```

use serde::{Deserialize, Serialize};

use crate::coercion::{coerce, parse_date, parse_number, parse_time};
use crate::condition::Condition;
use crate::snapshot::Snapshot;
use crate::value::{RawValue, Value};

/// The value kind of an input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Floating-point number
    Number,
    /// Free text (including delimited lists)
    Text,
    /// Single choice from an enumerated list
    Select,
    /// Boolean flag
    Checkbox,
    /// Calendar date
    Date,
    /// Clock time
    Time,
}

impl FieldKind {
    /// Name used in diagnostics and rendered forms
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::Text => "text",
            FieldKind::Select => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
        }
    }

    /// Check whether a declared default fits this kind.
    ///
    /// Blank defaults are always acceptable; the sentinel is a legitimate
    /// starting state for every kind.
    pub fn accepts_default(&self, raw: &RawValue) -> Result<(), String> {
        if raw.is_blank() {
            return Ok(());
        }
        let ok = match (self, raw) {
            (FieldKind::Number, RawValue::Number(n)) => n.is_finite(),
            (FieldKind::Number, RawValue::Text(s)) => parse_number(s).is_some(),
            (FieldKind::Text, RawValue::Text(_)) => true,
            (FieldKind::Select, RawValue::Text(_) | RawValue::Number(_)) => true,
            (FieldKind::Checkbox, RawValue::Bool(_)) => true,
            (FieldKind::Date, RawValue::Text(s)) => parse_date(s).is_some(),
            (FieldKind::Time, RawValue::Text(s)) => parse_time(s).is_some(),
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(format!("'{}' is not a valid {} value", raw.as_text(), self.name()))
        }
    }
}

/// One option of a select field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: &'static str,
    pub value: &'static str,
}

impl Choice {
    pub const fn new(label: &'static str, value: &'static str) -> Self {
        Self { label, value }
    }
}

/// Declaration of a single calculator input.
#[derive(Debug, Clone, Serialize)]
pub struct InputField {
    /// Identifier, unique within its calculator
    pub id: &'static str,
    /// Display label
    pub label: &'static str,
    /// Value kind
    pub kind: FieldKind,
    /// Value used when the user has not supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<RawValue>,
    /// Placeholder hint shown in an empty field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    /// Unit label (decorative, never used in computation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    /// Ordered choices (select fields only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// Visibility condition; `None` means always visible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<Condition>,
}

impl InputField {
    fn new(id: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            id,
            label,
            kind,
            default: None,
            placeholder: None,
            unit: None,
            choices: Vec::new(),
            visible_when: None,
        }
    }

    pub fn number(id: &'static str, label: &'static str) -> Self {
        Self::new(id, label, FieldKind::Number)
    }

    pub fn text(id: &'static str, label: &'static str) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    pub fn select(id: &'static str, label: &'static str, choices: Vec<Choice>) -> Self {
        Self {
            choices,
            ..Self::new(id, label, FieldKind::Select)
        }
    }

    pub fn checkbox(id: &'static str, label: &'static str) -> Self {
        Self::new(id, label, FieldKind::Checkbox)
    }

    pub fn date(id: &'static str, label: &'static str) -> Self {
        Self::new(id, label, FieldKind::Date)
    }

    pub fn time(id: &'static str, label: &'static str) -> Self {
        Self::new(id, label, FieldKind::Time)
    }

    pub fn default_value(mut self, value: impl Into<RawValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn placeholder(mut self, hint: &'static str) -> Self {
        self.placeholder = Some(hint);
        self
    }

    pub fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn visible_when(mut self, condition: Condition) -> Self {
        self.visible_when = Some(condition);
        self
    }

    /// True if the field has a visibility condition
    pub fn is_conditional(&self) -> bool {
        self.visible_when.is_some()
    }

    /// Evaluate the field's visibility against a snapshot.
    pub fn is_visible(&self, snapshot: &Snapshot) -> bool {
        self.visible_when
            .as_ref()
            .map_or(true, |condition| condition.evaluate(snapshot))
    }

    /// Coerce a raw value for this field, substituting the default when the
    /// user has supplied nothing.
    pub fn coerce(&self, raw: Option<&RawValue>) -> Value {
        let empty = RawValue::Empty;
        let source = match raw {
            Some(value) => value,
            None => self.default.as_ref().unwrap_or(&empty),
        };
        coerce(self.kind, source)
    }

    /// Coerced default value (the value of an untouched field)
    pub fn default_coerced(&self) -> Value {
        self.coerce(None)
    }

    /// Whether `value` is one of this field's choice values
    pub fn has_choice(&self, value: &str) -> bool {
        self.choices.iter().any(|c| c.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_substitution() {
        let field = InputField::number("meters", "Meters").default_value(1.75);
        assert_eq!(field.coerce(None), Value::Number(Some(1.75)));
        assert_eq!(field.coerce(Some(&RawValue::from("2"))), Value::Number(Some(2.0)));
        // An explicit blank is the user's value, not a request for the default
        assert_eq!(field.coerce(Some(&RawValue::from(""))), Value::Number(None));
    }

    #[test]
    fn test_field_without_default_uses_sentinel() {
        let field = InputField::date("birth", "Birth Date");
        assert_eq!(field.default_coerced(), Value::Date(None));
        let flag = InputField::checkbox("split", "Split");
        assert_eq!(flag.default_coerced(), Value::Flag(false));
    }

    #[test]
    fn test_accepts_default() {
        assert!(FieldKind::Number.accepts_default(&RawValue::from("3.5")).is_ok());
        assert!(FieldKind::Number.accepts_default(&RawValue::from("three")).is_err());
        assert!(FieldKind::Checkbox.accepts_default(&RawValue::from(true)).is_ok());
        assert!(FieldKind::Checkbox.accepts_default(&RawValue::from("true")).is_err());
        assert!(FieldKind::Date.accepts_default(&RawValue::from("2024-01-01")).is_ok());
        assert!(FieldKind::Date.accepts_default(&RawValue::from("")).is_ok());
        assert!(FieldKind::Time.accepts_default(&RawValue::from(9.0)).is_err());
    }

    #[test]
    fn test_choices() {
        let field = InputField::select(
            "from",
            "From",
            vec![Choice::new("Kilograms", "kg"), Choice::new("Pounds", "lb")],
        );
        assert!(field.has_choice("kg"));
        assert!(!field.has_choice("oz"));
    }

    #[test]
    fn test_serialization_skips_empty_parts() {
        let field = InputField::number("x", "X");
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["kind"], "number");
        assert!(json.get("choices").is_none());
        assert!(json.get("visible_when").is_none());
    }
}
