//! Math calculators: number theory, algebra and basic geometry.

use std::f64::consts::PI;

use crate::category::Category;
use crate::condition::Condition;
use crate::definition::{CalculatorDefinition, SeoMeta};
use crate::field::{Choice, InputField};
use crate::output::{Formula, OutputField, OutputValue};
use crate::precision::{format_number, round_dp};
use crate::snapshot::Snapshot;

pub fn definitions() -> Vec<CalculatorDefinition> {
    vec![
        gcd_calculator(),
        lcm_calculator(),
        quadratic_solver(),
        percentage_calculator(),
        pythagorean_calculator(),
        circle_calculator(),
    ]
}

// ============================================================================
// GCD / LCM
// ============================================================================

fn gcd_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("gcd-calculator", "GCD Calculator", Category::Math)
        .description("Greatest common divisor of a list of whole numbers.")
        .icon("divide")
        .seo(SeoMeta::new(
            "GCD Calculator",
            "Find the greatest common divisor (GCF, HCF) of two or more numbers.",
            &["gcd", "gcf", "greatest common factor"],
        ))
        .input(
            InputField::text("numbers", "Numbers")
                .default_value("12, 18, 24")
                .placeholder("e.g. 12, 18, 24"),
        )
        .output(OutputField::new("GCD", Formula::pure("gcd", &["numbers"], gcd_output)))
        .content(
            "Method",
            "Euclid's algorithm is applied pairwise. Decimals are truncated and signs ignored.",
        )
}

fn lcm_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("lcm-calculator", "LCM Calculator", Category::Math)
        .description("Least common multiple of a list of whole numbers.")
        .icon("divide")
        .input(
            InputField::text("numbers", "Numbers")
                .default_value("4, 6, 8")
                .placeholder("e.g. 4, 6, 8"),
        )
        .output(OutputField::new("LCM", Formula::pure("lcm", &["numbers"], lcm_output)))
}

/// Whole, non-negative values of a delimited list
fn whole_numbers(s: &Snapshot) -> Vec<u64> {
    s.numbers("numbers").into_iter().map(|n| n.abs().trunc() as u64).collect()
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

fn gcd_output(s: &Snapshot) -> OutputValue {
    let result = whole_numbers(s).into_iter().fold(0, gcd);
    (result as f64).into()
}

fn lcm_output(s: &Snapshot) -> OutputValue {
    let numbers = whole_numbers(s);
    let Some((first, rest)) = numbers.split_first() else {
        return OutputValue::ZERO;
    };
    let result = rest.iter().try_fold(*first, |acc, &n| lcm(acc, n));
    match result {
        // f64 holds integers exactly up to 2^53
        Some(n) if n <= 1 << 53 => (n as f64).into(),
        _ => "Result too large".into(),
    }
}

// ============================================================================
// Quadratic equation
// ============================================================================

fn quadratic_solver() -> CalculatorDefinition {
    CalculatorDefinition::new("quadratic-solver", "Quadratic Equation Solver", Category::Math)
        .description("Solve ax² + bx + c = 0 for real or complex roots.")
        .icon("function")
        .input(InputField::number("a", "a").default_value(1.0))
        .input(InputField::number("b", "b").default_value(-3.0))
        .input(InputField::number("c", "c").default_value(-4.0))
        .output(OutputField::new(
            "Discriminant",
            Formula::pure("quadratic_discriminant", &["a", "b", "c"], discriminant_output),
        ))
        .output(OutputField::new("Root 1", Formula::pure("quadratic_root_1", &["a", "b", "c"], root_1)))
        .output(OutputField::new("Root 2", Formula::pure("quadratic_root_2", &["a", "b", "c"], root_2)))
        .output(OutputField::new("Roots", Formula::pure("quadratic_roots", &["a", "b", "c"], roots_summary)))
}

#[derive(Debug, Clone, PartialEq)]
enum Roots {
    Real(f64, f64),
    Complex { re: f64, im: f64 },
    Linear(f64),
    /// a = 0 and b = 0
    Degenerate,
}

fn coefficients(s: &Snapshot) -> (f64, f64, f64) {
    (s.number_or_zero("a"), s.number_or_zero("b"), s.number_or_zero("c"))
}

fn solve_quadratic(a: f64, b: f64, c: f64) -> Roots {
    if a == 0.0 {
        if b == 0.0 {
            return Roots::Degenerate;
        }
        return Roots::Linear(round_dp(-c / b, 6));
    }
    let d = b * b - 4.0 * a * c;
    if d >= 0.0 {
        let sqrt_d = d.sqrt();
        Roots::Real(
            round_dp((-b + sqrt_d) / (2.0 * a), 6),
            round_dp((-b - sqrt_d) / (2.0 * a), 6),
        )
    } else {
        Roots::Complex {
            re: round_dp(-b / (2.0 * a), 6),
            im: round_dp((-d).sqrt() / (2.0 * a).abs(), 6),
        }
    }
}

fn discriminant_output(s: &Snapshot) -> OutputValue {
    let (a, b, c) = coefficients(s);
    round_dp(b * b - 4.0 * a * c, 6).into()
}

fn complex(re: f64, im: f64, sign: char) -> String {
    format!("{} {} {}i", format_number(re), sign, format_number(im))
}

fn root_1(s: &Snapshot) -> OutputValue {
    let (a, b, c) = coefficients(s);
    match solve_quadratic(a, b, c) {
        Roots::Real(x1, _) => x1.into(),
        Roots::Linear(x) => x.into(),
        Roots::Complex { re, im } => complex(re, im, '+').into(),
        Roots::Degenerate => "Not an equation".into(),
    }
}

fn root_2(s: &Snapshot) -> OutputValue {
    let (a, b, c) = coefficients(s);
    match solve_quadratic(a, b, c) {
        Roots::Real(_, x2) => x2.into(),
        Roots::Complex { re, im } => complex(re, im, '-').into(),
        Roots::Linear(_) | Roots::Degenerate => OutputValue::empty(),
    }
}

fn roots_summary(s: &Snapshot) -> OutputValue {
    let (a, b, c) = coefficients(s);
    let text = match solve_quadratic(a, b, c) {
        Roots::Real(x1, x2) if x1 == x2 => format!("x = {}", format_number(x1)),
        Roots::Real(x1, x2) => format!("x1 = {}, x2 = {}", format_number(x1), format_number(x2)),
        Roots::Complex { re, im } => format!("x = {} ± {}i", format_number(re), format_number(im)),
        Roots::Linear(x) => format!("x = {} (linear)", format_number(x)),
        Roots::Degenerate => "Not an equation".to_string(),
    };
    text.into()
}

// ============================================================================
// Percentages
// ============================================================================

fn percent_of() -> Condition {
    Condition::equals("mode", "percent_of")
}

fn what_percent() -> Condition {
    Condition::equals("mode", "what_percent")
}

fn percent_change() -> Condition {
    Condition::equals("mode", "change")
}

fn percentage_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("percentage-calculator", "Percentage Calculator", Category::Math)
        .description("Percent of a number, percentage of a total, or percent change.")
        .icon("percent")
        .input(
            InputField::select(
                "mode",
                "Calculation",
                vec![
                    Choice::new("What is P% of X?", "percent_of"),
                    Choice::new("X is what % of Y?", "what_percent"),
                    Choice::new("Percent change from A to B", "change"),
                ],
            )
            .default_value("percent_of"),
        )
        .input(
            InputField::number("percent", "Percent")
                .default_value(25.0)
                .unit("%")
                .visible_when(percent_of()),
        )
        .input(
            InputField::number("part", "Value")
                .default_value(50.0)
                .visible_when(what_percent()),
        )
        .input(
            InputField::number("whole", "Of")
                .default_value(200.0)
                .visible_when(Condition::one_of("mode", &["percent_of", "what_percent"])),
        )
        .input(
            InputField::number("from", "From")
                .default_value(80.0)
                .visible_when(percent_change()),
        )
        .input(
            InputField::number("to", "To")
                .default_value(100.0)
                .visible_when(percent_change()),
        )
        .output(
            OutputField::new(
                "Result",
                Formula::pure(
                    "percentage_result",
                    &["mode", "percent", "part", "whole", "from", "to"],
                    percentage_result,
                ),
            )
            .respects_visibility(),
        )
        .output(
            OutputField::new(
                "Explanation",
                Formula::pure(
                    "percentage_explanation",
                    &["mode", "percent", "part", "whole", "from", "to"],
                    percentage_explanation,
                ),
            )
            .respects_visibility(),
        )
}

/// Result for the active mode, reading only the inputs that mode shows
fn percentage(s: &Snapshot) -> Result<f64, &'static str> {
    if percent_of().evaluate(s) {
        Ok(round_dp(s.number_or_zero("percent") / 100.0 * s.number_or_zero("whole"), 6))
    } else if what_percent().evaluate(s) {
        let whole = s.number_or_zero("whole");
        if whole == 0.0 {
            return Err("Cannot divide by zero");
        }
        Ok(round_dp(s.number_or_zero("part") / whole * 100.0, 6))
    } else if percent_change().evaluate(s) {
        let from = s.number_or_zero("from");
        if from == 0.0 {
            return Err("Starting value cannot be zero");
        }
        Ok(round_dp((s.number_or_zero("to") - from) / from.abs() * 100.0, 6))
    } else {
        Err("")
    }
}

fn percentage_result(s: &Snapshot) -> OutputValue {
    match percentage(s) {
        Ok(v) => v.into(),
        Err(message) => message.into(),
    }
}

fn percentage_explanation(s: &Snapshot) -> OutputValue {
    let Ok(result) = percentage(s) else {
        return OutputValue::empty();
    };
    let n = |id| format_number(s.number_or_zero(id));
    let text = if percent_of().evaluate(s) {
        format!("{}% of {} = {}", n("percent"), n("whole"), format_number(result))
    } else if what_percent().evaluate(s) {
        format!("{} is {}% of {}", n("part"), format_number(result), n("whole"))
    } else {
        let direction = if result >= 0.0 { "increase" } else { "decrease" };
        format!(
            "{} to {} is a {}% {}",
            n("from"),
            n("to"),
            format_number(result.abs()),
            direction
        )
    };
    text.into()
}

// ============================================================================
// Pythagorean theorem
// ============================================================================

fn pythagorean_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("pythagorean-calculator", "Pythagorean Theorem Calculator", Category::Math)
        .description("Enter any two sides of a right triangle to find the third.")
        .icon("triangle")
        .input(InputField::number("a", "Side a").default_value(3.0))
        .input(InputField::number("b", "Side b").default_value(4.0))
        .input(InputField::number("c", "Hypotenuse c").placeholder("leave blank to solve"))
        .output(OutputField::new(
            "Missing Side",
            Formula::pure("pythagorean_side", &["a", "b", "c"], missing_side),
        ))
        .output(OutputField::new(
            "Solved For",
            Formula::pure("pythagorean_solved_for", &["a", "b", "c"], solved_for),
        ))
}

fn solve_right_triangle(s: &Snapshot) -> Result<(&'static str, f64), &'static str> {
    let sides = [s.number("a"), s.number("b"), s.number("c")];
    if sides.iter().filter(|side| side.is_some()).count() != 2 {
        return Err("Enter exactly 2 values");
    }
    if sides.iter().flatten().any(|side| *side <= 0.0) {
        return Err("Sides must be positive");
    }
    match sides {
        [Some(a), Some(b), None] => Ok(("c", (a * a + b * b).sqrt())),
        [Some(leg), None, Some(c)] | [None, Some(leg), Some(c)] => {
            if c <= leg {
                return Err("Hypotenuse must be the longest side");
            }
            let missing = if sides[0].is_none() { "a" } else { "b" };
            Ok((missing, (c * c - leg * leg).sqrt()))
        }
        _ => Err("Enter exactly 2 values"),
    }
}

fn missing_side(s: &Snapshot) -> OutputValue {
    match solve_right_triangle(s) {
        Ok((_, side)) => round_dp(side, 4).into(),
        Err(message) => message.into(),
    }
}

fn solved_for(s: &Snapshot) -> OutputValue {
    match solve_right_triangle(s) {
        Ok((name, _)) => name.into(),
        Err(_) => OutputValue::empty(),
    }
}

// ============================================================================
// Circle
// ============================================================================

fn circle_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("circle-calculator", "Circle Calculator", Category::Math)
        .description("Area, circumference and diameter from a radius.")
        .icon("circle")
        .input(InputField::number("radius", "Radius").default_value(1.0))
        .output(OutputField::new("Area", Formula::pure("circle_area", &["radius"], circle_area)))
        .output(OutputField::new(
            "Circumference",
            Formula::pure("circle_circumference", &["radius"], circle_circumference),
        ))
        .output(OutputField::new(
            "Diameter",
            Formula::pure("circle_diameter", &["radius"], circle_diameter),
        ))
}

fn radius(s: &Snapshot) -> f64 {
    s.number_or_zero("radius").max(0.0)
}

fn circle_area(s: &Snapshot) -> OutputValue {
    round_dp(PI * radius(s).powi(2), 4).into()
}

fn circle_circumference(s: &Snapshot) -> OutputValue {
    round_dp(2.0 * PI * radius(s), 4).into()
}

fn circle_diameter(s: &Snapshot) -> OutputValue {
    round_dp(2.0 * radius(s), 4).into()
}
