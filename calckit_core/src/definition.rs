//! # Calculator Definitions
//!
//! A [`CalculatorDefinition`] is one catalogue entry: metadata, ordered
//! inputs, ordered outputs and static help text. Definitions are built once
//! with the builder methods below and never mutated after registration.
//!
//! Evaluating a definition is stateless. Given a snapshot, every output runs
//! in declared order and the results are returned with their labels and
//! units. Visibility only matters to the renderer; hidden inputs keep their
//! values in the snapshot.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use calckit_core::category::Category;
//! use calckit_core::definition::CalculatorDefinition;
//! use calckit_core::field::InputField;
//! use calckit_core::output::{Formula, OutputField, OutputValue};
//! use calckit_core::snapshot::Snapshot;
//! use calckit_core::value::RawValue;
//!
//! fn square(s: &Snapshot) -> OutputValue {
//!     s.number_or_zero("x").powi(2).into()
//! }
//!
//! let definition = CalculatorDefinition::new("square", "Square", Category::Math)
//!     .input(InputField::number("x", "X").default_value(3.0))
//!     .output(OutputField::new("Square", Formula::pure("square", &["x"], square)));
//!
//! let results = definition.evaluate(&definition.default_snapshot());
//! assert_eq!(results[0].display(), "9");
//!
//! let mut raw = HashMap::new();
//! raw.insert("x".to_string(), RawValue::from("4"));
//! assert_eq!(definition.evaluate_raw(&raw)[0].display(), "16");
//! ```

use std::collections::HashMap;

use serde::Serialize;
use tracing::trace_span;

use crate::category::Category;
use crate::field::InputField;
use crate::output::{Evaluation, OutputField};
use crate::snapshot::Snapshot;
use crate::value::RawValue;

/// Search-engine metadata for a calculator page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeoMeta {
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: Vec<&'static str>,
}

impl SeoMeta {
    pub fn new(title: &'static str, description: &'static str, keywords: &[&'static str]) -> Self {
        Self {
            title,
            description,
            keywords: keywords.to_vec(),
        }
    }
}

/// A static help block shown below the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBlock {
    pub heading: &'static str,
    pub body: &'static str,
}

/// One catalogue entry.
#[derive(Debug, Clone, Serialize)]
pub struct CalculatorDefinition {
    /// Stable URL slug, unique across the registry
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    /// Icon reference understood by the renderer
    pub icon: &'static str,
    pub seo: SeoMeta,
    pub inputs: Vec<InputField>,
    pub outputs: Vec<OutputField>,
    pub content: Vec<ContentBlock>,
}

impl CalculatorDefinition {
    pub fn new(id: &'static str, title: &'static str, category: Category) -> Self {
        Self {
            id,
            title,
            description: "",
            category,
            icon: "calculator",
            seo: SeoMeta::default(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            content: Vec::new(),
        }
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn icon(mut self, icon: &'static str) -> Self {
        self.icon = icon;
        self
    }

    pub fn seo(mut self, seo: SeoMeta) -> Self {
        self.seo = seo;
        self
    }

    pub fn input(mut self, field: InputField) -> Self {
        self.inputs.push(field);
        self
    }

    pub fn output(mut self, output: OutputField) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn content(mut self, heading: &'static str, body: &'static str) -> Self {
        self.content.push(ContentBlock { heading, body });
        self
    }

    /// Look up an input by identifier
    pub fn field(&self, id: &str) -> Option<&InputField> {
        self.inputs.iter().find(|f| f.id == id)
    }

    /// Snapshot of the untouched form
    pub fn default_snapshot(&self) -> Snapshot {
        Snapshot::defaults(&self.inputs)
    }

    /// Full snapshot from the renderer's raw values
    pub fn snapshot(&self, raw: &HashMap<String, RawValue>) -> Snapshot {
        Snapshot::from_raw(&self.inputs, raw)
    }

    /// Inputs the renderer should show for this snapshot, in declared order
    pub fn visible_inputs(&self, snapshot: &Snapshot) -> Vec<&InputField> {
        self.inputs.iter().filter(|f| f.is_visible(snapshot)).collect()
    }

    /// Run every output in declared order.
    pub fn evaluate(&self, snapshot: &Snapshot) -> Vec<Evaluation> {
        let _span = trace_span!("evaluate", calculator = self.id).entered();
        self.outputs.iter().map(|output| output.evaluate(snapshot)).collect()
    }

    /// Coerce raw values and evaluate in one step
    pub fn evaluate_raw(&self, raw: &HashMap<String, RawValue>) -> Vec<Evaluation> {
        self.evaluate(&self.snapshot(raw))
    }

    /// True if any output is random or clock-dependent
    pub fn is_volatile(&self) -> bool {
        self.outputs.iter().any(|o| !o.formula.volatility.is_cacheable())
    }

    /// Short listing entry
    pub fn summary(&self) -> CalculatorSummary {
        CalculatorSummary {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            inputs: self.inputs.len(),
            outputs: self.outputs.len(),
        }
    }
}

/// Listing entry for a calculator, without its fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub inputs: usize,
    pub outputs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::field::Choice;
    use crate::output::{Formula, OutputValue};

    fn tip(s: &Snapshot) -> OutputValue {
        (s.number_or_zero("bill") * s.number_or_zero("percent") / 100.0).into()
    }

    fn per_person(s: &Snapshot) -> OutputValue {
        let people = if s.flag("split") { s.number_or_zero("people") } else { 1.0 };
        if people < 1.0 {
            return OutputValue::ZERO;
        }
        (s.number_or_zero("bill") / people).into()
    }

    fn definition() -> CalculatorDefinition {
        CalculatorDefinition::new("bill", "Bill", Category::Finance)
            .input(InputField::number("bill", "Bill").default_value(100.0))
            .input(
                InputField::select("percent", "Tip", vec![Choice::new("15%", "15"), Choice::new("20%", "20")])
                    .default_value("15"),
            )
            .input(InputField::checkbox("split", "Split"))
            .input(
                InputField::number("people", "People")
                    .default_value(4.0)
                    .visible_when(Condition::checked("split")),
            )
            .output(OutputField::new("Tip", Formula::pure("tip", &["bill", "percent"], tip)).unit("$"))
            .output(
                OutputField::new(
                    "Per Person",
                    Formula::pure("per_person", &["bill", "split", "people"], per_person),
                )
                .respects_visibility(),
            )
    }

    #[test]
    fn test_outputs_in_declared_order() {
        let def = definition();
        let results = def.evaluate(&def.default_snapshot());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label, "Tip");
        assert_eq!(results[0].display(), "15 $");
        assert_eq!(results[1].value, OutputValue::Number(100.0));
    }

    #[test]
    fn test_visible_inputs_follow_snapshot() {
        let def = definition();
        let snapshot = def.default_snapshot();
        let ids: Vec<&str> = def.visible_inputs(&snapshot).iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["bill", "percent", "split"]);

        let mut raw = HashMap::new();
        raw.insert("split".to_string(), RawValue::from(true));
        let snapshot = def.snapshot(&raw);
        assert_eq!(def.visible_inputs(&snapshot).len(), 4);
        assert_eq!(def.evaluate(&snapshot)[1].value, OutputValue::Number(25.0));
    }

    #[test]
    fn test_summary_and_volatility() {
        let def = definition();
        assert!(!def.is_volatile());
        let summary = def.summary();
        assert_eq!(summary.inputs, 4);
        assert_eq!(summary.outputs, 2);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["category"], "finance");
    }
}
