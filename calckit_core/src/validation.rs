//! # Load-time Validation
//!
//! Structural checks run on every definition when a registry is built.
//! Defects in the static catalogue are programming errors; they are
//! collected here so that a single build reports all of them at once.
//!
//! Reading a conditionally visible input from an output is legal (hidden
//! values stay in the snapshot) but easy to get wrong, so it is reported as
//! a warning unless the output declares that it re-checks the condition.
//! A strict registry treats those warnings as errors.

use std::collections::HashSet;

use crate::definition::CalculatorDefinition;
use crate::errors::CatalogError;
use crate::field::FieldKind;

/// Outcome of validating one definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<CatalogError>,
    pub warnings: Vec<CatalogError>,
}

impl ValidationReport {
    /// Record a defect under errors or warnings according to its kind
    pub fn push(&mut self, issue: CatalogError) {
        if issue.is_warning() {
            self.warnings.push(issue);
        } else {
            self.errors.push(issue);
        }
    }

    /// True when nothing would fail the build under the given policy
    pub fn is_ok(&self, strict: bool) -> bool {
        self.errors.is_empty() && (!strict || self.warnings.is_empty())
    }

    /// Defects that fail the build; warnings are included when `strict`
    pub fn into_errors(self, strict: bool) -> Vec<CatalogError> {
        let mut errors = self.errors;
        if strict {
            errors.extend(self.warnings);
        }
        errors
    }
}

fn is_slug(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('-')
        && !id.ends_with('-')
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Validate a single definition.
pub fn validate_definition(definition: &CalculatorDefinition) -> ValidationReport {
    let mut report = ValidationReport::default();
    let calculator = definition.id.to_string();

    if !is_slug(definition.id) {
        report.push(CatalogError::invalid_definition(
            definition.id,
            "Identifier must be a non-empty lowercase slug",
        ));
    }
    if definition.outputs.is_empty() {
        report.push(CatalogError::invalid_definition(definition.id, "Definition declares no outputs"));
    }

    let mut seen = HashSet::new();
    for (index, field) in definition.inputs.iter().enumerate() {
        if !seen.insert(field.id) {
            report.push(CatalogError::DuplicateInput {
                calculator: calculator.clone(),
                field: field.id.to_string(),
            });
        }

        if field.kind == FieldKind::Select && field.choices.is_empty() {
            report.push(CatalogError::MissingChoices {
                calculator: calculator.clone(),
                field: field.id.to_string(),
            });
        }

        if let Some(default) = &field.default {
            let reason = match field.kind.accepts_default(default) {
                Err(reason) => Some(reason),
                Ok(()) if field.kind == FieldKind::Select
                    && !field.choices.is_empty()
                    && !default.is_blank()
                    && !field.has_choice(&default.as_text()) =>
                {
                    Some(format!("'{}' is not one of the choices", default.as_text()))
                }
                Ok(()) => None,
            };
            if let Some(reason) = reason {
                report.push(CatalogError::DefaultMismatch {
                    calculator: calculator.clone(),
                    field: field.id.to_string(),
                    reason,
                });
            }
        }

        if let Some(condition) = &field.visible_when {
            for dependency in condition.dependencies() {
                match definition.inputs.iter().position(|f| f.id == dependency) {
                    None => report.push(CatalogError::UnknownDependency {
                        calculator: calculator.clone(),
                        field: field.id.to_string(),
                        dependency: dependency.to_string(),
                    }),
                    Some(position) if position >= index => {
                        report.push(CatalogError::ForwardDependency {
                            calculator: calculator.clone(),
                            field: field.id.to_string(),
                            dependency: dependency.to_string(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }
    }

    for output in &definition.outputs {
        for input in output.formula.reads {
            match definition.field(input) {
                None => report.push(CatalogError::UndeclaredRead {
                    calculator: calculator.clone(),
                    output: output.label.to_string(),
                    input: input.to_string(),
                }),
                Some(field) if field.is_conditional() && !output.respects_visibility => {
                    report.push(CatalogError::HiddenValueRead {
                        calculator: calculator.clone(),
                        output: output.label.to_string(),
                        input: input.to_string(),
                    })
                }
                Some(_) => {}
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::condition::Condition;
    use crate::field::{Choice, InputField};
    use crate::output::{Formula, OutputField, OutputValue};
    use crate::snapshot::Snapshot;

    fn zero(_: &Snapshot) -> OutputValue {
        OutputValue::ZERO
    }

    fn base() -> CalculatorDefinition {
        CalculatorDefinition::new("demo", "Demo", Category::Math)
            .input(InputField::number("a", "A").default_value(1.0))
    }

    fn codes(errors: &[CatalogError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.error_code()).collect()
    }

    #[test]
    fn test_push_sorts_warnings_from_errors() {
        let mut report = ValidationReport::default();
        report.push(CatalogError::HiddenValueRead {
            calculator: "demo".to_string(),
            output: "Out".to_string(),
            input: "a".to_string(),
        });
        report.push(CatalogError::invalid_definition("demo", "broken"));
        assert_eq!(codes(&report.warnings), vec!["HIDDEN_VALUE_READ"]);
        assert_eq!(codes(&report.errors), vec!["INVALID_DEFINITION"]);
        assert!(!report.is_ok(false));
    }

    #[test]
    fn test_valid_definition() {
        let def = base().output(OutputField::new("Out", Formula::pure("zero", &["a"], zero)));
        let report = validate_definition(&def);
        assert!(report.is_ok(true));
    }

    #[test]
    fn test_structural_defects() {
        let def = CalculatorDefinition::new("Bad Id", "Bad", Category::Math)
            .input(InputField::number("a", "A"))
            .input(InputField::number("a", "A again"))
            .input(InputField::select("unit", "Unit", vec![]))
            .input(InputField::number("b", "B").default_value("lots"));
        let report = validate_definition(&def);
        assert_eq!(
            codes(&report.errors),
            vec![
                "INVALID_DEFINITION",
                "INVALID_DEFINITION",
                "DUPLICATE_INPUT",
                "MISSING_CHOICES",
                "DEFAULT_MISMATCH"
            ]
        );
    }

    #[test]
    fn test_select_default_must_be_a_choice() {
        let def = base()
            .input(
                InputField::select("unit", "Unit", vec![Choice::new("Metric", "metric")])
                    .default_value("imperial"),
            )
            .output(OutputField::new("Out", Formula::pure("zero", &["a"], zero)));
        let report = validate_definition(&def);
        assert_eq!(codes(&report.errors), vec!["DEFAULT_MISMATCH"]);
    }

    #[test]
    fn test_visibility_dependencies_point_backwards() {
        let def = base()
            .input(InputField::number("b", "B").visible_when(Condition::checked("later")))
            .input(InputField::checkbox("later", "Later"))
            .input(InputField::number("c", "C").visible_when(Condition::checked("ghost")))
            .input(InputField::number("d", "D").visible_when(Condition::greater_than("d", 0.0)))
            .output(OutputField::new("Out", Formula::pure("zero", &["a"], zero)));
        let report = validate_definition(&def);
        assert_eq!(
            codes(&report.errors),
            vec!["FORWARD_DEPENDENCY", "UNKNOWN_DEPENDENCY", "FORWARD_DEPENDENCY"]
        );
    }

    #[test]
    fn test_undeclared_read() {
        let def = base().output(OutputField::new("Out", Formula::pure("zero", &["a", "z"], zero)));
        let report = validate_definition(&def);
        assert_eq!(codes(&report.errors), vec!["UNDECLARED_READ"]);
    }

    #[test]
    fn test_hidden_read_is_a_warning_unless_strict() {
        let def = base()
            .input(InputField::checkbox("on", "On"))
            .input(InputField::number("b", "B").visible_when(Condition::checked("on")))
            .output(OutputField::new("Out", Formula::pure("zero", &["b"], zero)));
        let report = validate_definition(&def);
        assert!(report.errors.is_empty());
        assert_eq!(codes(&report.warnings), vec!["HIDDEN_VALUE_READ"]);
        assert!(report.is_ok(false));
        assert!(!report.is_ok(true));
        assert_eq!(report.into_errors(true).len(), 1);
    }

    #[test]
    fn test_output_that_checks_visibility_is_not_warned() {
        let def = base()
            .input(InputField::checkbox("on", "On"))
            .input(InputField::number("b", "B").visible_when(Condition::checked("on")))
            .output(
                OutputField::new("Out", Formula::pure("zero", &["on", "b"], zero)).respects_visibility(),
            );
        assert!(validate_definition(&def).warnings.is_empty());
    }
}
