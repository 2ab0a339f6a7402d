//! Statistics calculators over a delimited list of numbers.

use crate::category::Category;
use crate::definition::CalculatorDefinition;
use crate::field::InputField;
use crate::output::{Formula, OutputField, OutputValue};
use crate::precision::round_dp;
use crate::snapshot::Snapshot;

pub fn definitions() -> Vec<CalculatorDefinition> {
    vec![average_calculator(), standard_deviation_calculator()]
}

fn values(s: &Snapshot) -> Vec<f64> {
    s.numbers("numbers")
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

// ============================================================================
// Average
// ============================================================================

fn average_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("average-calculator", "Average Calculator", Category::Statistics)
        .description("Mean, sum, count and range of a list of numbers or grades.")
        .icon("sigma")
        .input(
            InputField::text("numbers", "Numbers")
                .default_value("85, 92, 78, 90")
                .placeholder("Separate values with commas or spaces"),
        )
        .output(OutputField::new("Average", Formula::pure("average_mean", &["numbers"], average)))
        .output(OutputField::new("Sum", Formula::pure("average_sum", &["numbers"], sum)))
        .output(OutputField::new("Count", Formula::pure("average_count", &["numbers"], count)))
        .output(OutputField::new("Minimum", Formula::pure("average_min", &["numbers"], minimum)))
        .output(OutputField::new("Maximum", Formula::pure("average_max", &["numbers"], maximum)))
}

fn average(s: &Snapshot) -> OutputValue {
    mean(&values(s)).map_or(0.0, |m| round_dp(m, 4)).into()
}

fn sum(s: &Snapshot) -> OutputValue {
    round_dp(values(s).iter().sum(), 6).into()
}

fn count(s: &Snapshot) -> OutputValue {
    (values(s).len() as f64).into()
}

fn minimum(s: &Snapshot) -> OutputValue {
    values(s).into_iter().reduce(f64::min).unwrap_or(0.0).into()
}

fn maximum(s: &Snapshot) -> OutputValue {
    values(s).into_iter().reduce(f64::max).unwrap_or(0.0).into()
}

// ============================================================================
// Standard deviation
// ============================================================================

const STD_READS: &[&str] = &["numbers", "population"];

fn standard_deviation_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new(
        "standard-deviation-calculator",
        "Standard Deviation Calculator",
        Category::Statistics,
    )
    .description("Sample or population standard deviation and variance.")
    .icon("sigma")
    .input(InputField::text("numbers", "Numbers").default_value("2, 4, 4, 4, 5, 5, 7, 9"))
    .input(InputField::checkbox("population", "Population (not a sample)").default_value(false))
    .output(OutputField::new("Standard Deviation", Formula::pure("std_deviation", STD_READS, std_deviation)))
    .output(OutputField::new("Variance", Formula::pure("std_variance", STD_READS, std_variance)))
    .output(OutputField::new("Mean", Formula::pure("std_mean", &["numbers"], average)))
    .content(
        "Sample or population?",
        "A sample divides by n - 1 and needs at least two values. A population divides by n.",
    )
}

fn variance(s: &Snapshot) -> Result<f64, &'static str> {
    let values = values(s);
    let population = s.flag("population");
    let Some(m) = mean(&values) else {
        return Err(if population {
            "Enter at least 1 value"
        } else {
            "Enter at least 2 values"
        });
    };
    let n = values.len() as f64;
    let denominator = if population { n } else { n - 1.0 };
    if denominator < 1.0 {
        return Err("Enter at least 2 values");
    }
    let squares: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Ok(squares / denominator)
}

fn std_deviation(s: &Snapshot) -> OutputValue {
    match variance(s) {
        Ok(v) => round_dp(v.sqrt(), 4).into(),
        Err(message) => message.into(),
    }
}

fn std_variance(s: &Snapshot) -> OutputValue {
    match variance(s) {
        Ok(v) => round_dp(v, 4).into(),
        Err(message) => message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn numbers(text: &str, population: bool) -> Snapshot {
        let mut s = Snapshot::new();
        s.set("numbers", Value::Text(text.to_string()));
        s.set("population", Value::Flag(population));
        s
    }

    #[test]
    fn test_average_defaults() {
        let def = average_calculator();
        let results = def.evaluate(&def.default_snapshot());
        assert_eq!(results[0].value, OutputValue::Number(86.25));
        assert_eq!(results[1].value, OutputValue::Number(345.0));
        assert_eq!(results[2].value, OutputValue::Number(4.0));
        assert_eq!(results[3].value, OutputValue::Number(78.0));
        assert_eq!(results[4].value, OutputValue::Number(92.0));
    }

    #[test]
    fn test_average_of_nothing() {
        let s = numbers("abc, ,", false);
        assert_eq!(average(&s), OutputValue::ZERO);
        assert_eq!(count(&s), OutputValue::ZERO);
        assert_eq!(minimum(&s), OutputValue::ZERO);
    }

    #[test]
    fn test_standard_deviation() {
        let data = "2, 4, 4, 4, 5, 5, 7, 9";
        assert_eq!(std_deviation(&numbers(data, true)), OutputValue::Number(2.0));
        assert_eq!(std_deviation(&numbers(data, false)), OutputValue::Number(2.1381));
        assert_eq!(std_variance(&numbers(data, false)), OutputValue::Number(4.5714));
    }

    #[test]
    fn test_too_few_values() {
        assert_eq!(
            std_deviation(&numbers("5", false)),
            OutputValue::Text("Enter at least 2 values".to_string())
        );
        assert_eq!(std_deviation(&numbers("5", true)), OutputValue::ZERO);
        assert_eq!(
            std_deviation(&numbers("", true)),
            OutputValue::Text("Enter at least 1 value".to_string())
        );
    }
}
