//! Unit conversion calculators.

use crate::catalog::{convert, unit_choices, Unit};
use crate::category::Category;
use crate::definition::{CalculatorDefinition, SeoMeta};
use crate::field::{Choice, InputField};
use crate::output::{Formula, OutputField, OutputValue};
use crate::precision::{format_feet_inches, format_number, round_dp};
use crate::snapshot::Snapshot;

const METERS_PER_FOOT: f64 = 0.3048;
const METERS_PER_INCH: f64 = 0.0254;

/// Kilogram factors
const WEIGHT_UNITS: &[Unit] = &[
    Unit::new("Kilograms", "kg", 1.0),
    Unit::new("Grams", "g", 0.001),
    Unit::new("Pounds", "lb", 0.453_592_37),
    Unit::new("Ounces", "oz", 0.028_349_523_125),
    Unit::new("Stone", "st", 6.350_293_18),
    Unit::new("Metric Tonnes", "t", 1000.0),
];

/// Meter factors
const LENGTH_UNITS: &[Unit] = &[
    Unit::new("Millimeters", "mm", 0.001),
    Unit::new("Centimeters", "cm", 0.01),
    Unit::new("Meters", "m", 1.0),
    Unit::new("Kilometers", "km", 1000.0),
    Unit::new("Inches", "in", METERS_PER_INCH),
    Unit::new("Feet", "ft", METERS_PER_FOOT),
    Unit::new("Yards", "yd", 0.9144),
    Unit::new("Miles", "mi", 1609.344),
];

const ABSOLUTE_ZERO_C: f64 = -273.15;

pub fn definitions() -> Vec<CalculatorDefinition> {
    vec![
        meters_to_feet(),
        feet_to_meters(),
        weight_converter(),
        temperature_converter(),
        length_converter(),
    ]
}

// ============================================================================
// Meters <-> feet
// ============================================================================

fn meters_to_feet() -> CalculatorDefinition {
    CalculatorDefinition::new("meters-to-feet", "Meters to Feet Converter", Category::Conversion)
        .description("Convert meters to feet, and to feet and inches.")
        .icon("ruler")
        .seo(SeoMeta::new(
            "Meters to Feet Converter",
            "Convert a length in meters to decimal feet or feet and inches.",
            &["meters to feet", "m to ft", "height converter"],
        ))
        .input(InputField::number("meters", "Meters").default_value(1.0).unit("m"))
        .output(OutputField::new("Feet", Formula::pure("meters_to_feet", &["meters"], meters_to_feet_value)).unit("ft"))
        .output(OutputField::new(
            "Feet and Inches",
            Formula::pure("meters_to_feet_inches", &["meters"], meters_to_feet_inches),
        ))
        .output(OutputField::new("Inches", Formula::pure("meters_to_inches", &["meters"], meters_to_inches)).unit("in"))
        .content(
            "How to convert",
            "One foot is exactly 0.3048 meters, so divide the length in meters by 0.3048.",
        )
}

fn meters_to_feet_value(s: &Snapshot) -> OutputValue {
    round_dp(s.number_or_zero("meters") / METERS_PER_FOOT, 4).into()
}

fn meters_to_feet_inches(s: &Snapshot) -> OutputValue {
    format_feet_inches(s.number_or_zero("meters") / METERS_PER_INCH).into()
}

fn meters_to_inches(s: &Snapshot) -> OutputValue {
    round_dp(s.number_or_zero("meters") / METERS_PER_INCH, 2).into()
}

fn feet_to_meters() -> CalculatorDefinition {
    CalculatorDefinition::new("feet-to-meters", "Feet to Meters Converter", Category::Conversion)
        .description("Convert feet and inches to meters and centimeters.")
        .icon("ruler")
        .input(InputField::number("feet", "Feet").default_value(5.0).unit("ft"))
        .input(InputField::number("inches", "Inches").default_value(9.0).unit("in"))
        .output(
            OutputField::new("Meters", Formula::pure("feet_to_meters", &["feet", "inches"], feet_to_meters_value))
                .unit("m"),
        )
        .output(
            OutputField::new(
                "Centimeters",
                Formula::pure("feet_to_centimeters", &["feet", "inches"], feet_to_centimeters),
            )
            .unit("cm"),
        )
}

fn total_meters(s: &Snapshot) -> f64 {
    s.number_or_zero("feet") * METERS_PER_FOOT + s.number_or_zero("inches") * METERS_PER_INCH
}

fn feet_to_meters_value(s: &Snapshot) -> OutputValue {
    round_dp(total_meters(s), 4).into()
}

fn feet_to_centimeters(s: &Snapshot) -> OutputValue {
    round_dp(total_meters(s) * 100.0, 2).into()
}

// ============================================================================
// Weight and length (table driven)
// ============================================================================

fn weight_converter() -> CalculatorDefinition {
    CalculatorDefinition::new("weight-converter", "Weight Converter", Category::Conversion)
        .description("Convert between kilograms, pounds, ounces, stone and more.")
        .icon("scale")
        .input(InputField::number("value", "Value").default_value(1.0))
        .input(InputField::select("from", "From", unit_choices(WEIGHT_UNITS)).default_value("kg"))
        .input(InputField::select("to", "To", unit_choices(WEIGHT_UNITS)).default_value("lb"))
        .output(OutputField::new(
            "Result",
            Formula::pure("weight_result", &["value", "from", "to"], weight_result),
        ))
        .output(OutputField::new(
            "Summary",
            Formula::pure("weight_summary", &["value", "from", "to"], weight_summary),
        ))
}

fn weight_result(s: &Snapshot) -> OutputValue {
    table_result(WEIGHT_UNITS, s)
}

fn weight_summary(s: &Snapshot) -> OutputValue {
    table_summary(WEIGHT_UNITS, s)
}

fn length_converter() -> CalculatorDefinition {
    CalculatorDefinition::new("length-converter", "Length Converter", Category::Conversion)
        .description("Convert between metric and imperial lengths.")
        .icon("ruler")
        .input(InputField::number("value", "Value").default_value(1.0))
        .input(InputField::select("from", "From", unit_choices(LENGTH_UNITS)).default_value("mi"))
        .input(InputField::select("to", "To", unit_choices(LENGTH_UNITS)).default_value("km"))
        .output(OutputField::new(
            "Result",
            Formula::pure("length_result", &["value", "from", "to"], length_result),
        ))
        .output(OutputField::new(
            "Summary",
            Formula::pure("length_summary", &["value", "from", "to"], length_summary),
        ))
}

fn length_result(s: &Snapshot) -> OutputValue {
    table_result(LENGTH_UNITS, s)
}

fn length_summary(s: &Snapshot) -> OutputValue {
    table_summary(LENGTH_UNITS, s)
}

fn table_result(units: &[Unit], s: &Snapshot) -> OutputValue {
    convert(units, s.number_or_zero("value"), s.choice("from"), s.choice("to"))
        .map_or(OutputValue::ZERO, |v| round_dp(v, 6).into())
}

fn table_summary(units: &[Unit], s: &Snapshot) -> OutputValue {
    let value = s.number_or_zero("value");
    let (from, to) = (s.choice("from"), s.choice("to"));
    match convert(units, value, from, to) {
        Some(result) => format!(
            "{} {} = {} {}",
            format_number(value),
            from,
            format_number(round_dp(result, 6)),
            to
        )
        .into(),
        None => OutputValue::empty(),
    }
}

// ============================================================================
// Temperature
// ============================================================================

fn temperature_choices() -> Vec<Choice> {
    vec![
        Choice::new("Celsius", "c"),
        Choice::new("Fahrenheit", "f"),
        Choice::new("Kelvin", "k"),
    ]
}

fn temperature_converter() -> CalculatorDefinition {
    CalculatorDefinition::new("temperature-converter", "Temperature Converter", Category::Conversion)
        .description("Convert between Celsius, Fahrenheit and Kelvin.")
        .icon("thermometer")
        .input(InputField::number("value", "Temperature").default_value(0.0))
        .input(InputField::select("from", "From", temperature_choices()).default_value("c"))
        .input(InputField::select("to", "To", temperature_choices()).default_value("f"))
        .output(OutputField::new(
            "Result",
            Formula::pure("temperature_result", &["value", "from", "to"], temperature_result),
        ))
        .output(OutputField::new(
            "Summary",
            Formula::pure("temperature_summary", &["value", "from", "to"], temperature_summary),
        ))
}

fn to_kelvin(value: f64, scale: &str) -> Option<f64> {
    match scale {
        "c" => Some(value - ABSOLUTE_ZERO_C),
        "f" => Some((value - 32.0) * 5.0 / 9.0 - ABSOLUTE_ZERO_C),
        "k" => Some(value),
        _ => None,
    }
}

fn from_kelvin(kelvin: f64, scale: &str) -> Option<f64> {
    match scale {
        "c" => Some(kelvin + ABSOLUTE_ZERO_C),
        "f" => Some((kelvin + ABSOLUTE_ZERO_C) * 9.0 / 5.0 + 32.0),
        "k" => Some(kelvin),
        _ => None,
    }
}

fn scale_symbol(scale: &str) -> &'static str {
    match scale {
        "c" => "°C",
        "f" => "°F",
        "k" => "K",
        _ => "",
    }
}

/// Converted temperature, or a diagnostic for input below absolute zero
fn temperature(s: &Snapshot) -> Result<Option<f64>, &'static str> {
    let Some(kelvin) = to_kelvin(s.number_or_zero("value"), s.choice("from")) else {
        return Ok(None);
    };
    // Tolerate rounding noise right at absolute zero
    if kelvin < -1e-9 {
        return Err("Below absolute zero");
    }
    Ok(from_kelvin(kelvin.max(0.0), s.choice("to")).map(|t| round_dp(t, 4)))
}

fn temperature_result(s: &Snapshot) -> OutputValue {
    match temperature(s) {
        Ok(Some(t)) => t.into(),
        Ok(None) => OutputValue::ZERO,
        Err(message) => message.into(),
    }
}

fn temperature_summary(s: &Snapshot) -> OutputValue {
    match temperature(s) {
        Ok(Some(t)) => format!(
            "{} {} = {} {}",
            format_number(s.number_or_zero("value")),
            scale_symbol(s.choice("from")),
            format_number(t),
            scale_symbol(s.choice("to"))
        )
        .into(),
        _ => OutputValue::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn snapshot(value: f64, from: &str, to: &str) -> Snapshot {
        let mut s = Snapshot::new();
        s.set("value", Value::Number(Some(value)));
        s.set("from", Value::Choice(from.to_string()));
        s.set("to", Value::Choice(to.to_string()));
        s
    }

    #[test]
    fn test_meters_to_feet() {
        let def = meters_to_feet();
        let mut s = def.default_snapshot();
        s.set("meters", Value::Number(Some(1.75)));
        let results = def.evaluate(&s);
        assert_eq!(results[0].value, OutputValue::Number(5.7415));
        assert_eq!(results[0].display(), "5.7415 ft");
        assert_eq!(results[1].value, OutputValue::Text("5' 9\"".to_string()));
    }

    #[test]
    fn test_blank_meters_is_zero() {
        let def = meters_to_feet();
        let mut s = def.default_snapshot();
        s.set("meters", Value::Number(None));
        let results = def.evaluate(&s);
        assert_eq!(results[0].value, OutputValue::Number(0.0));
        assert_eq!(results[1].value, OutputValue::Text("0' 0\"".to_string()));
    }

    #[test]
    fn test_feet_to_meters() {
        let def = feet_to_meters();
        let results = def.evaluate(&def.default_snapshot());
        // 5' 9" = 69 inches
        assert_eq!(results[0].value, OutputValue::Number(1.7526));
        assert_eq!(results[1].value, OutputValue::Number(175.26));
    }

    #[test]
    fn test_weight_converter() {
        assert_eq!(weight_result(&snapshot(1.0, "kg", "lb")), OutputValue::Number(2.204623));
        assert_eq!(weight_result(&snapshot(14.0, "lb", "st")), OutputValue::Number(1.0));
        assert_eq!(
            weight_summary(&snapshot(1.0, "kg", "lb")),
            OutputValue::Text("1 kg = 2.204623 lb".to_string())
        );
        assert_eq!(weight_result(&snapshot(1.0, "kg", "")), OutputValue::ZERO);
    }

    #[test]
    fn test_length_converter() {
        assert_eq!(length_result(&snapshot(1.0, "mi", "km")), OutputValue::Number(1.609344));
        assert_eq!(length_result(&snapshot(3.0, "ft", "yd")), OutputValue::Number(1.0));
    }

    #[test]
    fn test_temperature_converter() {
        assert_eq!(temperature_result(&snapshot(100.0, "c", "f")), OutputValue::Number(212.0));
        assert_eq!(temperature_result(&snapshot(32.0, "f", "c")), OutputValue::Number(0.0));
        assert_eq!(temperature_result(&snapshot(0.0, "k", "c")), OutputValue::Number(-273.15));
        assert_eq!(
            temperature_result(&snapshot(-300.0, "c", "k")),
            OutputValue::Text("Below absolute zero".to_string())
        );
        assert_eq!(
            temperature_summary(&snapshot(100.0, "c", "f")),
            OutputValue::Text("100 °C = 212 °F".to_string())
        );
    }
}
