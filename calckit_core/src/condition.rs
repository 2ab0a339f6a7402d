//! # Condition Evaluator
//!
//! Visibility conditions are declarative records rather than opaque
//! closures. Each condition names the sibling inputs it depends on, which
//! lets the loader check that dependencies point backwards only and lets a
//! computation re-use the exact check the form used for display.
//!
//! Hidden fields are **not** removed from the snapshot. A computation that is
//! logically gated on the same condition must evaluate it itself.
//!
//! ## Example
//!
//! ```rust
//! use calckit_core::condition::Condition;
//! use calckit_core::snapshot::Snapshot;
//! use calckit_core::value::Value;
//!
//! let imperial = Condition::equals("unit_system", "imperial");
//!
//! let mut snapshot = Snapshot::new();
//! snapshot.set("unit_system", Value::Choice("metric".to_string()));
//! assert!(!imperial.evaluate(&snapshot));
//! assert_eq!(imperial.dependencies(), vec!["unit_system"]);
//! ```

use serde::Serialize;

use crate::field::InputField;
use crate::snapshot::Snapshot;

/// A declarative visibility predicate over the input snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Condition {
    /// Field's text form equals `value`
    Equals { field: &'static str, value: &'static str },
    /// Field's text form is one of `values`
    OneOf {
        field: &'static str,
        values: Vec<&'static str>,
    },
    /// Checkbox is ticked
    Checked { field: &'static str },
    /// Checkbox is not ticked
    Unchecked { field: &'static str },
    /// Number is present and strictly greater than `value`
    GreaterThan { field: &'static str, value: f64 },
    /// Number is present and strictly less than `value`
    LessThan { field: &'static str, value: f64 },
    /// Every nested condition holds
    All { conditions: Vec<Condition> },
    /// At least one nested condition holds
    Any { conditions: Vec<Condition> },
    /// The nested condition does not hold
    Not { condition: Box<Condition> },
}

impl Condition {
    pub fn equals(field: &'static str, value: &'static str) -> Self {
        Condition::Equals { field, value }
    }

    pub fn one_of(field: &'static str, values: &[&'static str]) -> Self {
        Condition::OneOf {
            field,
            values: values.to_vec(),
        }
    }

    pub fn checked(field: &'static str) -> Self {
        Condition::Checked { field }
    }

    pub fn unchecked(field: &'static str) -> Self {
        Condition::Unchecked { field }
    }

    pub fn greater_than(field: &'static str, value: f64) -> Self {
        Condition::GreaterThan { field, value }
    }

    pub fn less_than(field: &'static str, value: f64) -> Self {
        Condition::LessThan { field, value }
    }

    pub fn all(conditions: Vec<Condition>) -> Self {
        Condition::All { conditions }
    }

    pub fn any(conditions: Vec<Condition>) -> Self {
        Condition::Any { conditions }
    }

    pub fn negate(condition: Condition) -> Self {
        Condition::Not {
            condition: Box::new(condition),
        }
    }

    /// Evaluate against a snapshot. Missing fields make leaf conditions false.
    pub fn evaluate(&self, snapshot: &Snapshot) -> bool {
        match self {
            Condition::Equals { field, value } => snapshot
                .get(field)
                .is_some_and(|v| v.as_text() == *value),
            Condition::OneOf { field, values } => snapshot.get(field).is_some_and(|v| {
                let text = v.as_text();
                values.iter().any(|candidate| *candidate == text)
            }),
            Condition::Checked { field } => snapshot.flag(field),
            Condition::Unchecked { field } => snapshot.get(field).is_some() && !snapshot.flag(field),
            Condition::GreaterThan { field, value } => {
                snapshot.number(field).is_some_and(|n| n > *value)
            }
            Condition::LessThan { field, value } => {
                snapshot.number(field).is_some_and(|n| n < *value)
            }
            Condition::All { conditions } => conditions.iter().all(|c| c.evaluate(snapshot)),
            Condition::Any { conditions } => conditions.iter().any(|c| c.evaluate(snapshot)),
            Condition::Not { condition } => !condition.evaluate(snapshot),
        }
    }

    /// Identifiers of every input this condition reads, in first-seen order.
    pub fn dependencies(&self) -> Vec<&'static str> {
        let mut deps = Vec::new();
        self.collect_dependencies(&mut deps);
        deps
    }

    fn collect_dependencies(&self, deps: &mut Vec<&'static str>) {
        match self {
            Condition::Equals { field, .. }
            | Condition::OneOf { field, .. }
            | Condition::Checked { field }
            | Condition::Unchecked { field }
            | Condition::GreaterThan { field, .. }
            | Condition::LessThan { field, .. } => {
                if !deps.contains(field) {
                    deps.push(*field);
                }
            }
            Condition::All { conditions } | Condition::Any { conditions } => {
                for condition in conditions {
                    condition.collect_dependencies(deps);
                }
            }
            Condition::Not { condition } => condition.collect_dependencies(deps),
        }
    }
}

/// Decide whether `field` is shown for the current snapshot.
///
/// Fields without a condition are always visible. The snapshot is only
/// read, never modified.
pub fn visible(field: &InputField, snapshot: &Snapshot) -> bool {
    field.is_visible(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn snapshot() -> Snapshot {
        let mut s = Snapshot::new();
        s.set("mode", Value::Choice("percent_of".to_string()));
        s.set("split", Value::Flag(true));
        s.set("count", Value::Number(Some(3.0)));
        s.set("blank", Value::Number(None));
        s
    }

    #[test]
    fn test_leaf_conditions() {
        let s = snapshot();
        assert!(Condition::equals("mode", "percent_of").evaluate(&s));
        assert!(!Condition::equals("mode", "percent_change").evaluate(&s));
        assert!(Condition::one_of("mode", &["a", "percent_of"]).evaluate(&s));
        assert!(Condition::checked("split").evaluate(&s));
        assert!(!Condition::unchecked("split").evaluate(&s));
        assert!(Condition::greater_than("count", 2.0).evaluate(&s));
        assert!(!Condition::less_than("count", 2.0).evaluate(&s));
    }

    #[test]
    fn test_missing_and_blank_fields_are_false() {
        let s = snapshot();
        assert!(!Condition::equals("nope", "x").evaluate(&s));
        assert!(!Condition::unchecked("nope").evaluate(&s));
        assert!(!Condition::greater_than("blank", -1.0).evaluate(&s));
        assert!(!Condition::less_than("blank", 1.0).evaluate(&s));
    }

    #[test]
    fn test_combinators() {
        let s = snapshot();
        let both = Condition::all(vec![
            Condition::checked("split"),
            Condition::greater_than("count", 1.0),
        ]);
        assert!(both.evaluate(&s));
        let either = Condition::any(vec![
            Condition::equals("mode", "x"),
            Condition::unchecked("split"),
        ]);
        assert!(!either.evaluate(&s));
        assert!(Condition::negate(either).evaluate(&s));
    }

    #[test]
    fn test_dependencies_are_deduplicated() {
        let condition = Condition::all(vec![
            Condition::checked("split"),
            Condition::negate(Condition::equals("mode", "x")),
            Condition::greater_than("split", 0.0),
        ]);
        assert_eq!(condition.dependencies(), vec!["split", "mode"]);
    }

    #[test]
    fn test_visible_does_not_touch_snapshot() {
        let s = snapshot();
        let before = s.clone();
        let field = InputField::number("people", "People").visible_when(Condition::checked("split"));
        assert!(visible(&field, &s));
        assert_eq!(s, before);
    }

    #[test]
    fn test_condition_serialization() {
        let json = serde_json::to_value(Condition::equals("mode", "a")).unwrap();
        assert_eq!(json["op"], "equals");
        assert_eq!(json["field"], "mode");
    }
}
