//! Interactive form filling.
//!
//! Fields are asked for in declared order. Visibility is re-evaluated after
//! every answer, so switching a unit system or ticking a checkbox changes
//! which of the remaining fields are asked.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use calckit_core::definition::CalculatorDefinition;
use calckit_core::field::{FieldKind, InputField};
use calckit_core::value::RawValue;
use tracing::debug;

fn prompt_text(field: &InputField) -> String {
    let mut prompt = field.label.to_string();
    if let Some(unit) = field.unit {
        prompt.push_str(&format!(" ({})", unit));
    }
    if !field.choices.is_empty() {
        let values: Vec<&str> = field.choices.iter().map(|c| c.value).collect();
        prompt.push_str(&format!(" {{{}}}", values.join("|")));
    } else if field.kind == FieldKind::Checkbox {
        prompt.push_str(" [y/n]");
    } else if let Some(hint) = field.placeholder {
        prompt.push_str(&format!(" <{}>", hint));
    }
    let default = field.default.as_ref().map(|d| d.as_text()).unwrap_or_default();
    format!("{} [{}]: ", prompt, default)
}

/// Ask for every visible field and return the raw answers.
///
/// A blank answer keeps the field's default. End of input stops prompting
/// and keeps defaults for the remaining fields.
pub fn fill<R: BufRead, W: Write>(
    definition: &CalculatorDefinition,
    input: &mut R,
    output: &mut W,
) -> io::Result<HashMap<String, RawValue>> {
    let mut raw: HashMap<String, RawValue> = HashMap::new();

    for field in &definition.inputs {
        let snapshot = definition.snapshot(&raw);
        if !field.is_visible(&snapshot) {
            debug!(field = field.id, "skipping hidden field");
            continue;
        }

        loop {
            write!(output, "{}", prompt_text(field))?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(raw);
            }
            let answer = line.trim();
            if answer.is_empty() {
                break;
            }
            if field.kind == FieldKind::Select && !field.has_choice(answer) {
                writeln!(output, "  choose one of the listed values")?;
                continue;
            }
            raw.insert(field.id.to_string(), RawValue::from(answer));
            break;
        }
    }
    Ok(raw)
}
