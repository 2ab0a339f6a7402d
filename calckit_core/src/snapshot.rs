//! # Input Snapshot
//!
//! A [`Snapshot`] maps every declared input identifier to its coerced
//! [`Value`]. It is the only argument a computation or visibility condition
//! ever sees. Built from the form layer's raw values, it always carries one
//! entry per declared input (defaults substituted for untouched fields),
//! regardless of visibility.
//!
//! Computations read it through typed accessors. Accessors never fail: a
//! missing identifier or a value of another kind yields the kind's sentinel.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use calckit_core::field::InputField;
//! use calckit_core::snapshot::Snapshot;
//! use calckit_core::value::RawValue;
//!
//! let fields = vec![
//!     InputField::number("weight", "Weight").default_value(70.0),
//!     InputField::text("numbers", "Numbers"),
//! ];
//! let mut raw = HashMap::new();
//! raw.insert("numbers".to_string(), RawValue::from("4, 6, 8"));
//!
//! let snapshot = Snapshot::from_raw(&fields, &raw);
//! assert_eq!(snapshot.number("weight"), Some(70.0));
//! assert_eq!(snapshot.numbers("numbers"), vec![4.0, 6.0, 8.0]);
//! assert_eq!(snapshot.len(), 2);
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::debug;

use crate::coercion::{parse_number, parse_number_list};
use crate::field::InputField;
use crate::value::{RawValue, Value};

/// Coerced input values keyed by input identifier.
///
/// Ordered by identifier so that iteration (and hashing) is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    values: BTreeMap<String, Value>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the full snapshot for a set of declared fields.
    ///
    /// Fields the user never touched take their declared default; raw
    /// entries for identifiers that are not declared are ignored.
    pub fn from_raw(fields: &[InputField], raw: &HashMap<String, RawValue>) -> Self {
        let values = fields
            .iter()
            .map(|field| (field.id.to_string(), field.coerce(raw.get(field.id))))
            .collect();

        let unknown: Vec<&str> = raw
            .keys()
            .filter(|key| !fields.iter().any(|f| f.id == key.as_str()))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            debug!(?unknown, "ignoring raw values for undeclared inputs");
        }

        Self { values }
    }

    /// Snapshot of an untouched form: every field at its default
    pub fn defaults(fields: &[InputField]) -> Self {
        Self::from_raw(fields, &HashMap::new())
    }

    /// Replace (or add) one entry
    pub fn set(&mut self, id: impl Into<String>, value: Value) {
        self.values.insert(id.into(), value);
    }

    /// Copy of this snapshot keeping only the listed identifiers
    pub fn restricted_to(&self, ids: &[&str]) -> Self {
        let values = self
            .values
            .iter()
            .filter(|(id, _)| ids.iter().any(|wanted| *wanted == id.as_str()))
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect();
        Self { values }
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(id, value)| (id.as_str(), value))
    }

    // ------------------------------------------------------------------------
    // Typed accessors
    // ------------------------------------------------------------------------

    /// Numeric value, or `None` for the blank/invalid sentinel.
    ///
    /// Select and text values are parsed, so a select whose option values
    /// are numbers can be read directly.
    pub fn number(&self, id: &str) -> Option<f64> {
        match self.values.get(id)? {
            Value::Number(n) => *n,
            Value::Choice(s) | Value::Text(s) => parse_number(s),
            Value::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Date(_) | Value::Time(_) => None,
        }
    }

    /// Numeric value with the sentinel read as zero
    pub fn number_or_zero(&self, id: &str) -> f64 {
        self.number(id).unwrap_or(0.0)
    }

    /// Text or selected option value; empty for anything else
    pub fn text(&self, id: &str) -> &str {
        match self.values.get(id) {
            Some(Value::Text(s)) | Some(Value::Choice(s)) => s.as_str(),
            _ => "",
        }
    }

    /// Selected option value (alias of [`Snapshot::text`] for select fields)
    pub fn choice(&self, id: &str) -> &str {
        self.text(id)
    }

    /// Checkbox state; `false` when missing
    pub fn flag(&self, id: &str) -> bool {
        matches!(self.values.get(id), Some(Value::Flag(true)))
    }

    /// Calendar date, or `None` for the invalid-date sentinel
    pub fn date(&self, id: &str) -> Option<NaiveDate> {
        match self.values.get(id) {
            Some(Value::Date(d)) => *d,
            _ => None,
        }
    }

    /// Time of day, or `None` for the invalid-time sentinel
    pub fn time(&self, id: &str) -> Option<NaiveTime> {
        match self.values.get(id) {
            Some(Value::Time(t)) => *t,
            _ => None,
        }
    }

    /// Numbers in a delimited text field; unparsable tokens are dropped
    pub fn numbers(&self, id: &str) -> Vec<f64> {
        parse_number_list(self.text(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;

    fn fields() -> Vec<InputField> {
        vec![
            InputField::checkbox("split", "Split Bill"),
            InputField::number("people", "People")
                .default_value(2.0)
                .visible_when(Condition::checked("split")),
            InputField::date("start", "Start").default_value("2024-01-01"),
        ]
    }

    #[test]
    fn test_one_entry_per_field_regardless_of_visibility() {
        let snapshot = Snapshot::defaults(&fields());
        assert_eq!(snapshot.len(), 3);
        // Hidden because split is unchecked, but still present
        assert_eq!(snapshot.number("people"), Some(2.0));
        assert!(!snapshot.flag("split"));
    }

    #[test]
    fn test_undeclared_raw_values_are_ignored() {
        let mut raw = HashMap::new();
        raw.insert("bogus".to_string(), RawValue::from("1"));
        let snapshot = Snapshot::from_raw(&fields(), &raw);
        assert!(!snapshot.contains("bogus"));
    }

    #[test]
    fn test_accessors_on_missing_ids() {
        let snapshot = Snapshot::new();
        assert_eq!(snapshot.number("x"), None);
        assert_eq!(snapshot.number_or_zero("x"), 0.0);
        assert_eq!(snapshot.text("x"), "");
        assert!(!snapshot.flag("x"));
        assert_eq!(snapshot.date("x"), None);
        assert!(snapshot.numbers("x").is_empty());
    }

    #[test]
    fn test_accessors_on_other_kinds() {
        let mut snapshot = Snapshot::new();
        snapshot.set("sides", Value::Choice("20".to_string()));
        snapshot.set("start", Value::Number(Some(3.0)));
        assert_eq!(snapshot.number("sides"), Some(20.0));
        assert_eq!(snapshot.date("start"), None);
    }

    #[test]
    fn test_restricted_to() {
        let snapshot = Snapshot::defaults(&fields());
        let only = snapshot.restricted_to(&["people"]);
        assert_eq!(only.len(), 1);
        assert!(only.contains("people"));
    }
}
