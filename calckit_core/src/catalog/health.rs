//! Health calculators: BMI and basal metabolic rate.
//!
//! The BMI calculator switches between metric and imperial inputs. Both sets
//! stay in the snapshot whichever is shown, so its formulas evaluate the same
//! unit-system condition the form uses before choosing which set to read.

use crate::category::Category;
use crate::condition::Condition;
use crate::definition::{CalculatorDefinition, SeoMeta};
use crate::field::{Choice, InputField};
use crate::output::{Formula, OutputField, OutputValue};
use crate::precision::{format_number, round_dp};
use crate::snapshot::Snapshot;

const KG_PER_LB: f64 = 0.453_592_37;
const METERS_PER_INCH: f64 = 0.0254;

const HEALTHY_BMI_MIN: f64 = 18.5;
const HEALTHY_BMI_MAX: f64 = 24.9;

const BMI_READS: &[&str] = &["unit_system", "weight", "height", "weight_lb", "height_ft", "height_in"];

pub fn definitions() -> Vec<CalculatorDefinition> {
    vec![bmi_calculator(), bmr_calculator()]
}

fn metric() -> Condition {
    Condition::equals("unit_system", "metric")
}

fn imperial() -> Condition {
    Condition::equals("unit_system", "imperial")
}

fn unit_system() -> InputField {
    InputField::select(
        "unit_system",
        "Unit System",
        vec![Choice::new("Metric (kg, cm)", "metric"), Choice::new("Imperial (lb, ft/in)", "imperial")],
    )
    .default_value("metric")
}

// ============================================================================
// BMI
// ============================================================================

fn bmi_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("bmi-calculator", "BMI Calculator", Category::Health)
        .description("Body mass index from height and weight, in metric or imperial units.")
        .icon("heart")
        .seo(SeoMeta::new(
            "BMI Calculator",
            "Calculate your body mass index and see which weight category it falls in.",
            &["bmi", "body mass index", "healthy weight"],
        ))
        .input(unit_system())
        .input(InputField::number("weight", "Weight").default_value(70.0).unit("kg").visible_when(metric()))
        .input(InputField::number("height", "Height").default_value(175.0).unit("cm").visible_when(metric()))
        .input(
            InputField::number("weight_lb", "Weight")
                .default_value(154.0)
                .unit("lb")
                .visible_when(imperial()),
        )
        .input(
            InputField::number("height_ft", "Height (feet)")
                .default_value(5.0)
                .unit("ft")
                .visible_when(imperial()),
        )
        .input(
            InputField::number("height_in", "Height (inches)")
                .default_value(9.0)
                .unit("in")
                .visible_when(imperial()),
        )
        .output(OutputField::new("BMI", Formula::pure("bmi", BMI_READS, bmi_output)).respects_visibility())
        .output(OutputField::new("Category", Formula::pure("bmi_category", BMI_READS, bmi_category)).respects_visibility())
        .output(
            OutputField::new(
                "Healthy Weight Range",
                Formula::pure("bmi_healthy_range", BMI_READS, healthy_range),
            )
            .respects_visibility(),
        )
        .content(
            "What BMI means",
            "BMI is weight divided by height squared. It does not distinguish muscle from fat.",
        )
}

/// Weight in kilograms and height in meters from whichever unit set is shown
fn body_measurements(s: &Snapshot) -> Option<(f64, f64)> {
    let (kg, m) = if imperial().evaluate(s) {
        let inches = s.number_or_zero("height_ft") * 12.0 + s.number_or_zero("height_in");
        (s.number_or_zero("weight_lb") * KG_PER_LB, inches * METERS_PER_INCH)
    } else if metric().evaluate(s) {
        (s.number_or_zero("weight"), s.number_or_zero("height") / 100.0)
    } else {
        return None;
    };
    (kg > 0.0 && m > 0.0).then_some((kg, m))
}

fn bmi(s: &Snapshot) -> f64 {
    body_measurements(s).map_or(0.0, |(kg, m)| round_dp(kg / (m * m), 1))
}

fn bmi_output(s: &Snapshot) -> OutputValue {
    bmi(s).into()
}

/// Weight category for a BMI; empty for the `0` sentinel
pub fn bmi_category_name(bmi: f64) -> &'static str {
    if bmi <= 0.0 {
        ""
    } else if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal Weight"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

fn bmi_category(s: &Snapshot) -> OutputValue {
    bmi_category_name(bmi(s)).into()
}

fn healthy_range(s: &Snapshot) -> OutputValue {
    let Some((_, m)) = body_measurements(s) else {
        return OutputValue::empty();
    };
    let (low, high) = (HEALTHY_BMI_MIN * m * m, HEALTHY_BMI_MAX * m * m);
    let (low, high, unit) = if imperial().evaluate(s) {
        (low / KG_PER_LB, high / KG_PER_LB, "lb")
    } else {
        (low, high, "kg")
    };
    format!(
        "{} - {} {}",
        format_number(round_dp(low, 1)),
        format_number(round_dp(high, 1)),
        unit
    )
    .into()
}

// ============================================================================
// BMR (Mifflin-St Jeor)
// ============================================================================

fn bmr_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("bmr-calculator", "BMR Calculator", Category::Health)
        .description("Basal metabolic rate and daily calorie needs (Mifflin-St Jeor).")
        .icon("flame")
        .input(
            InputField::select("sex", "Sex", vec![Choice::new("Male", "male"), Choice::new("Female", "female")])
                .default_value("male"),
        )
        .input(InputField::number("age", "Age").default_value(30.0).unit("years"))
        .input(InputField::number("weight", "Weight").default_value(70.0).unit("kg"))
        .input(InputField::number("height", "Height").default_value(175.0).unit("cm"))
        .input(
            InputField::select(
                "activity",
                "Activity Level",
                vec![
                    Choice::new("Sedentary", "1.2"),
                    Choice::new("Lightly active", "1.375"),
                    Choice::new("Moderately active", "1.55"),
                    Choice::new("Very active", "1.725"),
                    Choice::new("Extra active", "1.9"),
                ],
            )
            .default_value("1.2"),
        )
        .output(
            OutputField::new("BMR", Formula::pure("bmr", &["sex", "age", "weight", "height"], bmr_output))
                .unit("kcal/day"),
        )
        .output(
            OutputField::new(
                "Daily Calories",
                Formula::pure("bmr_daily_calories", &["sex", "age", "weight", "height", "activity"], daily_calories),
            )
            .unit("kcal/day"),
        )
}

fn bmr(s: &Snapshot) -> f64 {
    let (weight, height, age) = (s.number_or_zero("weight"), s.number_or_zero("height"), s.number_or_zero("age"));
    if weight <= 0.0 || height <= 0.0 || age < 0.0 {
        return 0.0;
    }
    let offset = if s.choice("sex") == "female" { -161.0 } else { 5.0 };
    (10.0 * weight + 6.25 * height - 5.0 * age + offset).max(0.0)
}

fn bmr_output(s: &Snapshot) -> OutputValue {
    bmr(s).round().into()
}

fn daily_calories(s: &Snapshot) -> OutputValue {
    let factor = s.number("activity").unwrap_or(1.2);
    (bmr(s) * factor).round().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_bmi_metric() {
        let def = bmi_calculator();
        let results = def.evaluate(&def.default_snapshot());
        assert_eq!(results[0].value, OutputValue::Number(22.9));
        assert_eq!(results[1].value, OutputValue::Text("Normal Weight".to_string()));
        assert_eq!(results[2].value, OutputValue::Text("56.7 - 76.3 kg".to_string()));
    }

    #[test]
    fn test_bmi_imperial_ignores_hidden_metric_values() {
        let def = bmi_calculator();
        let mut s = def.default_snapshot();
        s.set("unit_system", Value::Choice("imperial".to_string()));
        // Stale metric values stay in the snapshot but must not be used
        s.set("weight", Value::Number(Some(500.0)));
        let results = def.evaluate(&s);
        // 154 lb, 69 in
        assert_eq!(results[0].value, OutputValue::Number(22.7));
        assert_eq!(results[1].value, OutputValue::Text("Normal Weight".to_string()));
        assert!(results[2].display().ends_with(" lb"));
    }

    #[test]
    fn test_bmi_blank_height() {
        let def = bmi_calculator();
        let mut s = def.default_snapshot();
        s.set("height", Value::Number(None));
        let results = def.evaluate(&s);
        assert_eq!(results[0].value, OutputValue::ZERO);
        assert_eq!(results[1].value, OutputValue::empty());
        assert_eq!(results[2].value, OutputValue::empty());
    }

    #[test]
    fn test_bmi_categories() {
        assert_eq!(bmi_category_name(0.0), "");
        assert_eq!(bmi_category_name(18.4), "Underweight");
        assert_eq!(bmi_category_name(18.5), "Normal Weight");
        assert_eq!(bmi_category_name(25.0), "Overweight");
        assert_eq!(bmi_category_name(30.0), "Obese");
    }

    #[test]
    fn test_bmr() {
        let def = bmr_calculator();
        let mut s = def.default_snapshot();
        // 700 + 1093.75 - 150 + 5
        assert_eq!(bmr_output(&s), OutputValue::Number(1649.0));
        s.set("sex", Value::Choice("female".to_string()));
        assert_eq!(bmr_output(&s), OutputValue::Number(1483.0));
        s.set("activity", Value::Choice("1.55".to_string()));
        assert_eq!(daily_calories(&s), OutputValue::Number(2298.0));
        s.set("weight", Value::Number(None));
        assert_eq!(bmr_output(&s), OutputValue::ZERO);
    }
}
