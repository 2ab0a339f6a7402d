//! # Built-in Catalogue
//!
//! The calculators shipped with calckit, one module per category. Each
//! module exposes `definitions()`; the formulas themselves are private
//! functions registered by name on each output.
//!
//! ## Available Modules
//!
//! - [`conversion`] - length, weight and temperature conversions
//! - [`math`] - GCD/LCM, quadratic roots, percentages, triangles, circles
//! - [`health`] - BMI and basal metabolic rate
//! - [`finance`] - loan payments, tips, compound interest
//! - [`statistics`] - averages and standard deviation
//! - [`datetime`] - age, days between dates, time durations
//! - [`physics`] - Ohm's law
//! - [`random`] - dice, random numbers, passwords

pub mod conversion;
pub mod datetime;
pub mod finance;
pub mod health;
pub mod math;
pub mod physics;
pub mod random;
pub mod statistics;

use crate::definition::CalculatorDefinition;
use crate::field::Choice;

/// Every built-in definition, grouped by category
pub fn definitions() -> Vec<CalculatorDefinition> {
    let mut all = Vec::new();
    all.extend(conversion::definitions());
    all.extend(math::definitions());
    all.extend(health::definitions());
    all.extend(finance::definitions());
    all.extend(statistics::definitions());
    all.extend(datetime::definitions());
    all.extend(physics::definitions());
    all.extend(random::definitions());
    all
}

/// A unit of measure and its factor to the base unit of its table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Unit {
    pub label: &'static str,
    pub symbol: &'static str,
    pub factor: f64,
}

impl Unit {
    pub const fn new(label: &'static str, symbol: &'static str, factor: f64) -> Self {
        Self { label, symbol, factor }
    }
}

/// Select choices for a unit table
pub(crate) fn unit_choices(units: &[Unit]) -> Vec<Choice> {
    units.iter().map(|u| Choice::new(u.label, u.symbol)).collect()
}

/// Factor to the base unit, if the symbol is in the table
pub(crate) fn unit_factor(units: &[Unit], symbol: &str) -> Option<f64> {
    units.iter().find(|u| u.symbol == symbol).map(|u| u.factor)
}

/// Convert between two units of the same table
pub(crate) fn convert(units: &[Unit], value: f64, from: &str, to: &str) -> Option<f64> {
    Some(value * unit_factor(units, from)? / unit_factor(units, to)?)
}

/// `1 day`, `2 days`
pub(crate) fn plural(count: i64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::registry::Registry;

    #[test]
    fn test_builtin_catalogue_passes_strict_validation() {
        let strict = RegistryConfig {
            strict: true,
            ..RegistryConfig::default()
        };
        let registry = Registry::build(definitions(), &strict).unwrap();
        assert_eq!(registry.len(), definitions().len());
    }

    #[test]
    fn test_every_category_is_populated() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.categories().len(), crate::category::Category::ALL.len());
    }

    #[test]
    fn test_helpers() {
        const UNITS: &[Unit] = &[Unit::new("Meters", "m", 1.0), Unit::new("Kilometers", "km", 1000.0)];
        assert_eq!(convert(UNITS, 2.0, "km", "m"), Some(2000.0));
        assert_eq!(convert(UNITS, 2.0, "km", "parsec"), None);
        assert_eq!(unit_choices(UNITS)[1].value, "km");
        assert_eq!(plural(1, "day", "days"), "1 day");
        assert_eq!(plural(0, "day", "days"), "0 days");
    }
}
