//! Plain-text rendering of definitions and evaluation results.

use std::fmt::Write;

use calckit_core::condition::Condition;
use calckit_core::definition::CalculatorDefinition;
use calckit_core::field::InputField;
use calckit_core::output::Evaluation;
use calckit_core::precision::format_number;
use calckit_core::snapshot::Snapshot;
use calckit_core::Category;

const RULE: &str = "═══════════════════════════════════════";

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  {}", title.to_uppercase());
    let _ = writeln!(out, "{}", RULE);
}

/// Calculators grouped by category
pub fn render_list(definitions: &[&CalculatorDefinition]) -> String {
    let mut out = String::new();
    let width = definitions.iter().map(|d| d.id.len()).max().unwrap_or(0);
    for category in Category::ALL {
        let members: Vec<_> = definitions.iter().filter(|d| d.category == category).collect();
        if members.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}", category.display_name());
        for d in members {
            let _ = writeln!(out, "  {:width$}  {}", d.id, d.title, width = width);
        }
        out.push('\n');
    }
    out
}

/// Human-readable form of a visibility condition
pub fn describe_condition(condition: &Condition) -> String {
    match condition {
        Condition::Equals { field, value } => format!("{} = {}", field, value),
        Condition::OneOf { field, values } => format!("{} in [{}]", field, values.join(", ")),
        Condition::Checked { field } => format!("{} checked", field),
        Condition::Unchecked { field } => format!("{} unchecked", field),
        Condition::GreaterThan { field, value } => format!("{} > {}", field, format_number(*value)),
        Condition::LessThan { field, value } => format!("{} < {}", field, format_number(*value)),
        Condition::All { conditions } => join_conditions(conditions, " and "),
        Condition::Any { conditions } => join_conditions(conditions, " or "),
        Condition::Not { condition } => format!("not ({})", describe_condition(condition)),
    }
}

fn join_conditions(conditions: &[Condition], separator: &str) -> String {
    let parts: Vec<String> = conditions.iter().map(describe_condition).collect();
    format!("({})", parts.join(separator))
}

fn field_label(field: &InputField) -> String {
    match field.unit {
        Some(unit) => format!("{} ({})", field.label, unit),
        None => field.label.to_string(),
    }
}

/// Full schema of one calculator
pub fn render_definition(definition: &CalculatorDefinition) -> String {
    let mut out = String::new();
    header(&mut out, &format!("{} ({})", definition.title, definition.id));
    if !definition.description.is_empty() {
        let _ = writeln!(out, "{}", definition.description);
    }
    let _ = writeln!(out, "Category: {}", definition.category);

    let _ = writeln!(out, "\nInputs:");
    for field in &definition.inputs {
        let default = field.default.as_ref().map(|d| d.as_text()).unwrap_or_default();
        let _ = write!(
            out,
            "  {:14} {:9} {:24} [{}]",
            field.id,
            field.kind.name(),
            field_label(field),
            default
        );
        if !field.choices.is_empty() {
            let values: Vec<&str> = field.choices.iter().map(|c| c.value).collect();
            let _ = write!(out, "  choices: {}", values.join(", "));
        }
        if let Some(condition) = &field.visible_when {
            let _ = write!(out, "  when: {}", describe_condition(condition));
        }
        out.push('\n');
    }

    let _ = writeln!(out, "\nOutputs:");
    for output in &definition.outputs {
        let _ = writeln!(
            out,
            "  {:24} {:7} {}",
            output.label,
            format!("{:?}", output.formula.volatility).to_lowercase(),
            output.formula.name
        );
    }

    for block in &definition.content {
        let _ = writeln!(out, "\n{}\n  {}", block.heading, block.body);
    }
    out
}

/// Visible inputs and every output of one evaluation
pub fn render_evaluation(definition: &CalculatorDefinition, snapshot: &Snapshot, results: &[Evaluation]) -> String {
    let mut out = String::new();
    header(&mut out, definition.title);

    let _ = writeln!(out, "\nInputs:");
    for field in definition.visible_inputs(snapshot) {
        let value = snapshot.get(field.id).map(|v| v.as_text()).unwrap_or_default();
        let value = match (field.unit, value.is_empty()) {
            (Some(unit), false) => format!("{} {}", value, unit),
            _ => value,
        };
        let _ = writeln!(out, "  {:24} {}", format!("{}:", field.label), value);
    }

    let _ = writeln!(out, "\nResults:");
    for result in results {
        let _ = writeln!(out, "  {:24} {}", format!("{}:", result.label), result.display());
    }
    let _ = writeln!(out, "{}", RULE);
    out
}
