//! Physics calculators.

use crate::category::Category;
use crate::definition::CalculatorDefinition;
use crate::field::InputField;
use crate::output::{Formula, OutputField, OutputValue};
use crate::precision::{format_number, round_dp};
use crate::snapshot::Snapshot;

const OHM_READS: &[&str] = &["voltage", "current", "resistance"];

pub fn definitions() -> Vec<CalculatorDefinition> {
    vec![ohms_law_calculator()]
}

fn ohms_law_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("ohms-law-calculator", "Ohm's Law Calculator", Category::Physics)
        .description("Enter any two of voltage, current and resistance to solve for the third.")
        .icon("bolt")
        .input(InputField::number("voltage", "Voltage").default_value(12.0).unit("V"))
        .input(InputField::number("current", "Current").default_value(2.0).unit("A"))
        .input(InputField::number("resistance", "Resistance").unit("Ω").placeholder("leave blank to solve"))
        .output(OutputField::new("Solution", Formula::pure("ohm_solution", OHM_READS, solution)))
        .output(OutputField::new("Voltage", Formula::pure("ohm_voltage", OHM_READS, voltage)).unit("V"))
        .output(OutputField::new("Current", Formula::pure("ohm_current", OHM_READS, current)).unit("A"))
        .output(OutputField::new("Resistance", Formula::pure("ohm_resistance", OHM_READS, resistance)).unit("Ω"))
        .output(OutputField::new("Power", Formula::pure("ohm_power", OHM_READS, power)).unit("W"))
        .content("Ohm's law", "V = I × R. Power is P = V × I.")
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Circuit {
    voltage: f64,
    current: f64,
    resistance: f64,
    /// Which quantity was solved for
    solved: &'static str,
}

fn solve(s: &Snapshot) -> Result<Circuit, &'static str> {
    let given = [s.number("voltage"), s.number("current"), s.number("resistance")];
    if given.iter().filter(|v| v.is_some()).count() != 2 {
        return Err("Enter exactly 2 values");
    }
    match given {
        [Some(voltage), Some(current), None] => {
            if current == 0.0 {
                return Err("Current cannot be zero");
            }
            Ok(Circuit { voltage, current, resistance: voltage / current, solved: "Resistance" })
        }
        [Some(voltage), None, Some(resistance)] => {
            if resistance == 0.0 {
                return Err("Resistance cannot be zero");
            }
            Ok(Circuit { voltage, current: voltage / resistance, resistance, solved: "Current" })
        }
        [None, Some(current), Some(resistance)] => Ok(Circuit {
            voltage: current * resistance,
            current,
            resistance,
            solved: "Voltage",
        }),
        _ => Err("Enter exactly 2 values"),
    }
}

fn solution(s: &Snapshot) -> OutputValue {
    match solve(s) {
        Ok(circuit) => {
            let (value, unit) = match circuit.solved {
                "Voltage" => (circuit.voltage, "V"),
                "Current" => (circuit.current, "A"),
                _ => (circuit.resistance, "Ω"),
            };
            format!("{} = {} {}", circuit.solved, format_number(round_dp(value, 4)), unit).into()
        }
        Err(message) => message.into(),
    }
}

fn quantity(s: &Snapshot, pick: fn(&Circuit) -> f64) -> OutputValue {
    solve(s).map_or(0.0, |c| round_dp(pick(&c), 4)).into()
}

fn voltage(s: &Snapshot) -> OutputValue {
    quantity(s, |c| c.voltage)
}

fn current(s: &Snapshot) -> OutputValue {
    quantity(s, |c| c.current)
}

fn resistance(s: &Snapshot) -> OutputValue {
    quantity(s, |c| c.resistance)
}

fn power(s: &Snapshot) -> OutputValue {
    quantity(s, |c| c.voltage * c.current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn circuit(v: Option<f64>, i: Option<f64>, r: Option<f64>) -> Snapshot {
        let mut s = Snapshot::new();
        s.set("voltage", Value::Number(v));
        s.set("current", Value::Number(i));
        s.set("resistance", Value::Number(r));
        s
    }

    #[test]
    fn test_defaults_solve_resistance() {
        let def = ohms_law_calculator();
        let results = def.evaluate(&def.default_snapshot());
        assert_eq!(results[0].value, OutputValue::Text("Resistance = 6 Ω".to_string()));
        assert_eq!(results[3].display(), "6 Ω");
        assert_eq!(results[4].display(), "24 W");
    }

    #[test]
    fn test_solve_each_quantity() {
        assert_eq!(voltage(&circuit(None, Some(0.5), Some(10.0))), OutputValue::Number(5.0));
        assert_eq!(current(&circuit(Some(9.0), None, Some(3.0))), OutputValue::Number(3.0));
        assert_eq!(resistance(&circuit(Some(9.0), Some(3.0), None)), OutputValue::Number(3.0));
    }

    #[test]
    fn test_requires_exactly_two_values() {
        let expected = OutputValue::Text("Enter exactly 2 values".to_string());
        assert_eq!(solution(&circuit(Some(1.0), Some(1.0), Some(1.0))), expected);
        assert_eq!(solution(&circuit(Some(1.0), None, None)), expected);
        assert_eq!(power(&circuit(None, None, None)), OutputValue::ZERO);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            solution(&circuit(Some(5.0), Some(0.0), None)),
            OutputValue::Text("Current cannot be zero".to_string())
        );
        assert_eq!(
            solution(&circuit(Some(5.0), None, Some(0.0))),
            OutputValue::Text("Resistance cannot be zero".to_string())
        );
    }
}
