//! Random calculators. Every output here except password strength is
//! flagged `Random` and recomputed on each evaluation.

use crate::category::Category;
use crate::definition::CalculatorDefinition;
use crate::field::{Choice, InputField};
use crate::output::{Formula, OutputField, OutputValue};
use crate::precision::{format_number, round_dp};
use crate::rng;
use crate::snapshot::Snapshot;

const MAX_DICE: u64 = 100;
const MIN_PASSWORD: usize = 4;
const MAX_PASSWORD: usize = 128;

/// Integers beyond this lose precision as f64
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

pub fn definitions() -> Vec<CalculatorDefinition> {
    vec![dice_roller(), random_number_generator(), password_generator()]
}

// ============================================================================
// Dice
// ============================================================================

fn dice_roller() -> CalculatorDefinition {
    CalculatorDefinition::new("dice-roller", "Dice Roller", Category::Random)
        .description("Roll any number of dice with 4 to 100 sides.")
        .icon("dice")
        .input(InputField::number("count", "Number of Dice").default_value(2.0))
        .input(
            InputField::select(
                "sides",
                "Sides",
                vec![
                    Choice::new("d4", "4"),
                    Choice::new("d6", "6"),
                    Choice::new("d8", "8"),
                    Choice::new("d10", "10"),
                    Choice::new("d12", "12"),
                    Choice::new("d20", "20"),
                    Choice::new("d100", "100"),
                ],
            )
            .default_value("6"),
        )
        .output(OutputField::new("Roll", Formula::random("dice_roll", &["count", "sides"], roll_dice)))
}

fn roll_dice(s: &Snapshot) -> OutputValue {
    let count = (s.number_or_zero("count").max(1.0) as u64).min(MAX_DICE);
    let sides = s.number("sides").filter(|n| *n >= 2.0).map_or(6, |n| n as u64);
    let rolls: Vec<u64> = (0..count).map(|_| rng::below(sides) + 1).collect();
    format_rolls(&rolls).into()
}

/// `4` for one die, `3 + 5 = 8` for several
fn format_rolls(rolls: &[u64]) -> String {
    let total = rolls.iter().fold(0u64, |acc, r| acc.saturating_add(*r));
    if rolls.len() <= 1 {
        return total.to_string();
    }
    let parts: Vec<String> = rolls.iter().map(u64::to_string).collect();
    format!("{} = {}", parts.join(" + "), total)
}

// ============================================================================
// Random number
// ============================================================================

fn random_number_generator() -> CalculatorDefinition {
    CalculatorDefinition::new("random-number-generator", "Random Number Generator", Category::Random)
        .description("A random number between two bounds.")
        .icon("shuffle")
        .input(InputField::number("min", "Minimum").default_value(1.0))
        .input(InputField::number("max", "Maximum").default_value(100.0))
        .input(InputField::checkbox("integer", "Whole numbers only").default_value(true))
        .output(OutputField::new(
            "Random Number",
            Formula::random("random_number", &["min", "max", "integer"], random_number),
        ))
}

fn random_number(s: &Snapshot) -> OutputValue {
    let a = s.number_or_zero("min").clamp(-MAX_EXACT, MAX_EXACT);
    let b = s.number_or_zero("max").clamp(-MAX_EXACT, MAX_EXACT);
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    if s.flag("integer") {
        let (low, high) = (low.ceil(), high.floor());
        if low > high {
            return "No whole number in range".into();
        }
        (rng::between(low as i64, high as i64) as f64).into()
    } else {
        round_dp(low + rng::unit_f64() * (high - low), 4).into()
    }
}

// ============================================================================
// Password
// ============================================================================

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.?";

const PASSWORD_READS: &[&str] = &["length", "uppercase", "lowercase", "digits", "symbols"];

fn password_generator() -> CalculatorDefinition {
    CalculatorDefinition::new("password-generator", "Password Generator", Category::Random)
        .description("Generate a random password from the selected character sets.")
        .icon("key")
        .input(InputField::number("length", "Length").default_value(16.0))
        .input(InputField::checkbox("uppercase", "Uppercase letters").default_value(true))
        .input(InputField::checkbox("lowercase", "Lowercase letters").default_value(true))
        .input(InputField::checkbox("digits", "Digits").default_value(true))
        .input(InputField::checkbox("symbols", "Symbols").default_value(false))
        .output(OutputField::new("Password", Formula::random("password", PASSWORD_READS, password)))
        .output(OutputField::new("Strength", Formula::pure("password_strength", PASSWORD_READS, strength)))
        .content(
            "Privacy",
            "Passwords are generated from the operating system's random source and never stored.",
        )
}

fn character_sets(s: &Snapshot) -> Vec<&'static str> {
    [
        ("uppercase", UPPERCASE),
        ("lowercase", LOWERCASE),
        ("digits", DIGITS),
        ("symbols", SYMBOLS),
    ]
    .into_iter()
    .filter(|(id, _)| s.flag(id))
    .map(|(_, set)| set)
    .collect()
}

fn password_length(s: &Snapshot) -> usize {
    (s.number_or_zero("length").max(0.0) as usize).clamp(MIN_PASSWORD, MAX_PASSWORD)
}

fn pick(set: &str) -> char {
    let chars: Vec<char> = set.chars().collect();
    chars[rng::below(chars.len() as u64) as usize]
}

fn password(s: &Snapshot) -> OutputValue {
    let sets = character_sets(s);
    if sets.is_empty() {
        return "Select at least one character type".into();
    }
    let length = password_length(s);
    let pool: String = sets.concat();

    // One character from every selected set, the rest from the full pool
    let mut chars: Vec<char> = sets.iter().map(|set| pick(set)).collect();
    while chars.len() < length {
        chars.push(pick(&pool));
    }
    // Fisher-Yates so the guaranteed characters are not always first
    for i in (1..chars.len()).rev() {
        let j = rng::below(i as u64 + 1) as usize;
        chars.swap(i, j);
    }
    chars.into_iter().collect::<String>().into()
}

fn strength(s: &Snapshot) -> OutputValue {
    let pool: usize = character_sets(s).iter().map(|set| set.chars().count()).sum();
    if pool == 0 {
        return OutputValue::empty();
    }
    let bits = password_length(s) as f64 * (pool as f64).log2();
    let label = if bits < 40.0 {
        "Weak"
    } else if bits < 60.0 {
        "Fair"
    } else if bits < 80.0 {
        "Good"
    } else {
        "Strong"
    };
    format!("{} ({} bits)", label, format_number(bits.round())).into()
}
