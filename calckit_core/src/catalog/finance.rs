//! Finance calculators: loans, tips and compound interest.

use crate::category::Category;
use crate::condition::Condition;
use crate::definition::{CalculatorDefinition, SeoMeta};
use crate::field::{Choice, InputField};
use crate::output::{Formula, OutputField, OutputValue};
use crate::precision::round_dp;
use crate::snapshot::Snapshot;

pub fn definitions() -> Vec<CalculatorDefinition> {
    vec![loan_calculator(), tip_calculator(), compound_interest_calculator()]
}

// ============================================================================
// Loan payment
// ============================================================================

const LOAN_READS: &[&str] = &["amount", "rate", "years"];

fn loan_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("loan-calculator", "Loan Payment Calculator", Category::Finance)
        .description("Monthly payment, total cost and total interest of a fixed-rate loan.")
        .icon("bank")
        .seo(SeoMeta::new(
            "Loan Payment Calculator",
            "Estimate the monthly payment for a fixed-rate amortizing loan.",
            &["loan calculator", "monthly payment", "amortization"],
        ))
        .input(InputField::number("amount", "Loan Amount").default_value(10_000.0).unit("$"))
        .input(InputField::number("rate", "Annual Interest Rate").default_value(5.0).unit("%"))
        .input(InputField::number("years", "Loan Term").default_value(5.0).unit("years"))
        .output(OutputField::new("Monthly Payment", Formula::pure("loan_monthly_payment", LOAN_READS, monthly_payment_output)))
        .output(OutputField::new("Total Payment", Formula::pure("loan_total_payment", LOAN_READS, total_payment)))
        .output(OutputField::new("Total Interest", Formula::pure("loan_total_interest", LOAN_READS, total_interest)))
        .content(
            "Formula",
            "Payment = P * r / (1 - (1 + r)^-n), with r the monthly rate and n the number of payments.",
        )
}

/// Monthly payment and number of payments; `None` for a non-positive term or amount
fn loan(s: &Snapshot) -> Option<(f64, f64)> {
    let principal = s.number_or_zero("amount");
    let payments = (s.number_or_zero("years") * 12.0).round();
    if principal <= 0.0 || payments <= 0.0 {
        return None;
    }
    let r = s.number_or_zero("rate") / 100.0 / 12.0;
    let payment = if r == 0.0 {
        principal / payments
    } else {
        principal * r / (1.0 - (1.0 + r).powf(-payments))
    };
    payment.is_finite().then_some((payment, payments))
}

fn monthly_payment_output(s: &Snapshot) -> OutputValue {
    loan(s).map_or(0.0, |(payment, _)| round_dp(payment, 2)).into()
}

fn total_payment(s: &Snapshot) -> OutputValue {
    loan(s).map_or(0.0, |(payment, n)| round_dp(payment * n, 2)).into()
}

fn total_interest(s: &Snapshot) -> OutputValue {
    loan(s)
        .map_or(0.0, |(payment, n)| round_dp(payment * n - s.number_or_zero("amount"), 2))
        .into()
}

// ============================================================================
// Tip and bill splitting
// ============================================================================

const TIP_READS: &[&str] = &["bill", "tip_percent", "custom_tip", "split", "people"];

fn custom_tip() -> Condition {
    Condition::equals("tip_percent", "custom")
}

fn split() -> Condition {
    Condition::checked("split")
}

fn tip_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("tip-calculator", "Tip Calculator", Category::Finance)
        .description("Work out the tip and split the bill between friends.")
        .icon("receipt")
        .input(InputField::number("bill", "Bill Amount").default_value(50.0).unit("$"))
        .input(
            InputField::select(
                "tip_percent",
                "Tip",
                vec![
                    Choice::new("10%", "10"),
                    Choice::new("15%", "15"),
                    Choice::new("18%", "18"),
                    Choice::new("20%", "20"),
                    Choice::new("25%", "25"),
                    Choice::new("Custom", "custom"),
                ],
            )
            .default_value("15"),
        )
        .input(
            InputField::number("custom_tip", "Custom Tip")
                .default_value(12.0)
                .unit("%")
                .visible_when(custom_tip()),
        )
        .input(InputField::checkbox("split", "Split the bill").default_value(false))
        .input(InputField::number("people", "Number of People").default_value(2.0).visible_when(split()))
        .output(OutputField::new("Tip Amount", Formula::pure("tip_amount", TIP_READS, tip_amount_output)).respects_visibility())
        .output(OutputField::new("Total", Formula::pure("tip_total", TIP_READS, tip_total_output)).respects_visibility())
        .output(OutputField::new("Per Person", Formula::pure("tip_per_person", TIP_READS, tip_per_person)).respects_visibility())
}

fn tip_rate(s: &Snapshot) -> f64 {
    let percent = if custom_tip().evaluate(s) {
        s.number_or_zero("custom_tip")
    } else {
        s.number_or_zero("tip_percent")
    };
    percent.max(0.0) / 100.0
}

fn tip_amount(s: &Snapshot) -> f64 {
    s.number_or_zero("bill").max(0.0) * tip_rate(s)
}

fn tip_total(s: &Snapshot) -> f64 {
    s.number_or_zero("bill").max(0.0) + tip_amount(s)
}

fn tip_amount_output(s: &Snapshot) -> OutputValue {
    round_dp(tip_amount(s), 2).into()
}

fn tip_total_output(s: &Snapshot) -> OutputValue {
    round_dp(tip_total(s), 2).into()
}

fn tip_per_person(s: &Snapshot) -> OutputValue {
    let people = if split().evaluate(s) {
        s.number_or_zero("people").floor()
    } else {
        1.0
    };
    if people < 1.0 {
        return "At least 1 person required".into();
    }
    round_dp(tip_total(s) / people, 2).into()
}

// ============================================================================
// Compound interest
// ============================================================================

const COMPOUND_READS: &[&str] = &["principal", "rate", "years", "frequency"];

fn compound_interest_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("compound-interest-calculator", "Compound Interest Calculator", Category::Finance)
        .description("Future value of a deposit with periodic compounding.")
        .icon("chart")
        .input(InputField::number("principal", "Initial Deposit").default_value(1000.0).unit("$"))
        .input(InputField::number("rate", "Annual Interest Rate").default_value(5.0).unit("%"))
        .input(InputField::number("years", "Years").default_value(10.0))
        .input(
            InputField::select(
                "frequency",
                "Compounding",
                vec![
                    Choice::new("Annually", "1"),
                    Choice::new("Quarterly", "4"),
                    Choice::new("Monthly", "12"),
                    Choice::new("Daily", "365"),
                ],
            )
            .default_value("12"),
        )
        .output(OutputField::new("Future Value", Formula::pure("compound_future_value", COMPOUND_READS, future_value_output)))
        .output(OutputField::new(
            "Interest Earned",
            Formula::pure("compound_interest_earned", COMPOUND_READS, interest_earned),
        ))
}

fn future_value(s: &Snapshot) -> f64 {
    let principal = s.number_or_zero("principal");
    let years = s.number_or_zero("years").max(0.0);
    let periods = s.number("frequency").filter(|n| *n >= 1.0).unwrap_or(1.0);
    let rate = s.number_or_zero("rate") / 100.0;
    principal * (1.0 + rate / periods).powf(periods * years)
}

fn future_value_output(s: &Snapshot) -> OutputValue {
    round_dp(future_value(s), 2).into()
}

fn interest_earned(s: &Snapshot) -> OutputValue {
    round_dp(future_value(s) - s.number_or_zero("principal"), 2).into()
}
