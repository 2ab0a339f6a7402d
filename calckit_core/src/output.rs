//! # Output Computations
//!
//! Every output of a calculator is a named, registered [`Formula`]: a plain
//! function pointer from [`Snapshot`] to [`OutputValue`], the list of inputs
//! it reads, and a [`Volatility`] class. Nothing is captured, so formulas can
//! be tested in isolation and identified by name in logs.
//!
//! ## Contract
//!
//! - **Total**: defined for every snapshot coercion can produce. Domain
//!   violations return a sentinel (`0`, `""` or a short diagnostic string).
//! - **Deterministic** unless flagged `Random` or `Clock`.
//! - **Side-effect free**: reads the snapshot only.
//!
//! As a last line of defence [`Formula::apply`] maps NaN and infinite
//! results to the `0` sentinel.
//!
//! ## Example
//!
//! ```rust
//! use calckit_core::output::{Formula, OutputField, OutputValue};
//! use calckit_core::snapshot::Snapshot;
//! use calckit_core::value::Value;
//!
//! fn double(s: &Snapshot) -> OutputValue {
//!     (s.number_or_zero("x") * 2.0).into()
//! }
//!
//! let output = OutputField::new("Double", Formula::pure("double", &["x"], double)).unit("units");
//!
//! let mut snapshot = Snapshot::new();
//! snapshot.set("x", Value::Number(Some(21.0)));
//! let evaluation = output.evaluate(&snapshot);
//! assert_eq!(evaluation.display(), "42 units");
//! ```

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::trace;

use crate::precision::format_number;
use crate::snapshot::Snapshot;

/// The displayed result of a computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputValue {
    Number(f64),
    Text(String),
}

impl OutputValue {
    /// The `0` sentinel
    pub const ZERO: OutputValue = OutputValue::Number(0.0);

    /// Empty-string sentinel
    pub fn empty() -> Self {
        OutputValue::Text(String::new())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            OutputValue::Number(n) => Some(*n),
            OutputValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutputValue::Text(s) => Some(s),
            OutputValue::Number(_) => None,
        }
    }

    /// True for the `0` and empty-string sentinels
    pub fn is_blank(&self) -> bool {
        match self {
            OutputValue::Number(n) => *n == 0.0,
            OutputValue::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputValue::Number(n) => f.write_str(&format_number(*n)),
            OutputValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for OutputValue {
    fn from(value: f64) -> Self {
        OutputValue::Number(value)
    }
}

impl From<String> for OutputValue {
    fn from(value: String) -> Self {
        OutputValue::Text(value)
    }
}

impl From<&str> for OutputValue {
    fn from(value: &str) -> Self {
        OutputValue::Text(value.to_string())
    }
}

/// Whether repeated evaluation of the same snapshot gives the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    /// Same snapshot, same result
    Pure,
    /// Intentionally random (dice, random numbers, passwords)
    Random,
    /// Depends on the current date or time
    Clock,
}

impl Volatility {
    /// Only pure results may be memoized or deduplicated
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Volatility::Pure)
    }
}

/// Signature every registered computation implements
pub type Compute = fn(&Snapshot) -> OutputValue;

/// A named, registered computation.
#[derive(Clone, Copy)]
pub struct Formula {
    /// Stable name used in logs and serialized definitions
    pub name: &'static str,
    /// Inputs the computation reads
    pub reads: &'static [&'static str],
    pub volatility: Volatility,
    compute: Compute,
}

impl Formula {
    pub const fn pure(name: &'static str, reads: &'static [&'static str], compute: Compute) -> Self {
        Self {
            name,
            reads,
            volatility: Volatility::Pure,
            compute,
        }
    }

    pub const fn random(name: &'static str, reads: &'static [&'static str], compute: Compute) -> Self {
        Self {
            name,
            reads,
            volatility: Volatility::Random,
            compute,
        }
    }

    pub const fn clock(name: &'static str, reads: &'static [&'static str], compute: Compute) -> Self {
        Self {
            name,
            reads,
            volatility: Volatility::Clock,
            compute,
        }
    }

    /// Run the computation, mapping non-finite numbers to the `0` sentinel.
    pub fn apply(&self, snapshot: &Snapshot) -> OutputValue {
        match (self.compute)(snapshot) {
            OutputValue::Number(n) if !n.is_finite() => {
                trace!(formula = self.name, "non-finite result replaced with 0");
                OutputValue::ZERO
            }
            value => value,
        }
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formula")
            .field("name", &self.name)
            .field("reads", &self.reads)
            .field("volatility", &self.volatility)
            .finish()
    }
}

impl Serialize for Formula {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Formula", 3)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("reads", self.reads)?;
        state.serialize_field("volatility", &self.volatility)?;
        state.end()
    }
}

/// Declaration of a single calculator output.
#[derive(Debug, Clone, Serialize)]
pub struct OutputField {
    /// Display label
    pub label: &'static str,
    /// Unit appended to numeric results when displayed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    pub formula: Formula,
    /// The formula re-checks the visibility conditions of the conditional
    /// inputs it reads, so a stale hidden value cannot leak into the result
    pub respects_visibility: bool,
}

impl OutputField {
    pub fn new(label: &'static str, formula: Formula) -> Self {
        Self {
            label,
            unit: None,
            formula,
            respects_visibility: false,
        }
    }

    pub fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn respects_visibility(mut self) -> Self {
        self.respects_visibility = true;
        self
    }

    /// `calculate(snapshot) -> number | string`
    pub fn calculate(&self, snapshot: &Snapshot) -> OutputValue {
        self.formula.apply(snapshot)
    }

    /// Calculate and package the result with this output's label and unit
    pub fn evaluate(&self, snapshot: &Snapshot) -> Evaluation {
        self.evaluation_for(self.calculate(snapshot))
    }

    pub(crate) fn evaluation_for(&self, value: OutputValue) -> Evaluation {
        Evaluation {
            label: self.label,
            unit: self.unit,
            value,
            volatility: self.formula.volatility,
        }
    }
}

/// One computed output, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    pub value: OutputValue,
    pub volatility: Volatility,
}

impl Evaluation {
    /// Value with the unit label appended to numeric results.
    ///
    /// Text results (summaries, diagnostics, blanks) display as-is.
    pub fn display(&self) -> String {
        match (&self.value, self.unit) {
            (OutputValue::Number(_), Some(unit)) => format!("{} {}", self.value, unit),
            (value, _) => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn ratio(s: &Snapshot) -> OutputValue {
        (s.number_or_zero("a") / s.number_or_zero("b")).into()
    }

    fn label(s: &Snapshot) -> OutputValue {
        format!("{} items", s.number_or_zero("a")).into()
    }

    #[test]
    fn test_non_finite_results_become_zero() {
        let output = OutputField::new("Ratio", Formula::pure("ratio", &["a", "b"], ratio));
        let mut snapshot = Snapshot::new();
        snapshot.set("a", Value::Number(Some(1.0)));
        snapshot.set("b", Value::Number(Some(0.0)));
        assert_eq!(output.calculate(&snapshot), OutputValue::ZERO);

        snapshot.set("a", Value::Number(Some(0.0)));
        assert_eq!(output.calculate(&snapshot), OutputValue::ZERO);
    }

    #[test]
    fn test_display_appends_unit() {
        let output = OutputField::new("Ratio", Formula::pure("ratio", &["a", "b"], ratio)).unit("x");
        let mut snapshot = Snapshot::new();
        snapshot.set("a", Value::Number(Some(3.0)));
        snapshot.set("b", Value::Number(Some(2.0)));
        assert_eq!(output.evaluate(&snapshot).display(), "1.5 x");
    }

    #[test]
    fn test_text_displays_without_unit() {
        let mut evaluation = Evaluation {
            label: "Root 2",
            unit: Some("m"),
            value: OutputValue::empty(),
            volatility: Volatility::Pure,
        };
        assert_eq!(evaluation.display(), "");

        evaluation.value = "Sides must be positive".into();
        assert_eq!(evaluation.display(), "Sides must be positive");
    }

    #[test]
    fn test_volatility() {
        assert!(Volatility::Pure.is_cacheable());
        assert!(!Volatility::Random.is_cacheable());
        assert!(!Volatility::Clock.is_cacheable());
    }

    #[test]
    fn test_formula_serializes_by_name() {
        let output = OutputField::new("Label", Formula::pure("label", &["a"], label));
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["formula"]["name"], "label");
        assert_eq!(json["formula"]["reads"][0], "a");
        assert_eq!(json["formula"]["volatility"], "pure");
        assert_eq!(json["respects_visibility"], false);
    }
}
