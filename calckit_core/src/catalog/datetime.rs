//! Date and time calculators.
//!
//! Dates are calendar dates without a time zone. The age calculator falls
//! back to today's local date when no reference date is given, so its
//! outputs are flagged as clock-dependent.

use chrono::{Datelike, Local, Months, NaiveDate, NaiveTime};

use crate::catalog::plural;
use crate::category::Category;
use crate::definition::{CalculatorDefinition, SeoMeta};
use crate::field::InputField;
use crate::output::{Formula, OutputField, OutputValue};
use crate::precision::round_dp;
use crate::snapshot::Snapshot;

pub fn definitions() -> Vec<CalculatorDefinition> {
    vec![age_calculator(), days_between_calculator(), time_duration_calculator()]
}

// ============================================================================
// Age
// ============================================================================

const AGE_READS: &[&str] = &["birth_date", "as_of"];

fn age_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("age-calculator", "Age Calculator", Category::DateTime)
        .description("Exact age in years, months and days.")
        .icon("cake")
        .seo(SeoMeta::new(
            "Age Calculator",
            "Calculate an exact age from a date of birth.",
            &["age calculator", "how old am i", "date of birth"],
        ))
        .input(InputField::date("birth_date", "Date of Birth").default_value("1990-01-01"))
        .input(InputField::date("as_of", "Age on Date").placeholder("today"))
        .output(OutputField::new("Age", Formula::clock("age_years", AGE_READS, age_years)).unit("years"))
        .output(OutputField::new("Exact Age", Formula::clock("age_exact", AGE_READS, age_exact)))
        .output(OutputField::new("Days Lived", Formula::clock("age_days", AGE_READS, age_days)).unit("days"))
}

/// Whole years, months and remaining days between two dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    years: u32,
    months: u32,
    days: i64,
}

fn span_between(start: NaiveDate, end: NaiveDate) -> Option<Span> {
    if end < start {
        return None;
    }
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    let months = u32::try_from(months.max(0)).ok()?;
    let mut anchor = start.checked_add_months(Months::new(months))?;
    let mut months = months;
    // A month-end birthday can clamp past the reference date
    if anchor > end && months > 0 {
        months -= 1;
        anchor = start.checked_add_months(Months::new(months))?;
    }
    Some(Span {
        years: months / 12,
        months: months % 12,
        days: (end - anchor).num_days(),
    })
}

fn age_dates(s: &Snapshot) -> Result<(NaiveDate, NaiveDate), &'static str> {
    let birth = s.date("birth_date").ok_or("")?;
    let as_of = s.date("as_of").unwrap_or_else(|| Local::now().date_naive());
    if birth > as_of {
        return Err("Birth date is in the future");
    }
    Ok((birth, as_of))
}

fn age_span(s: &Snapshot) -> Result<Span, &'static str> {
    let (birth, as_of) = age_dates(s)?;
    span_between(birth, as_of).ok_or("")
}

fn age_years(s: &Snapshot) -> OutputValue {
    match age_span(s) {
        Ok(span) => f64::from(span.years).into(),
        Err(message) if message.is_empty() => OutputValue::ZERO,
        Err(message) => message.into(),
    }
}

fn age_exact(s: &Snapshot) -> OutputValue {
    match age_span(s) {
        Ok(span) => format!(
            "{}, {}, {}",
            plural(span.years.into(), "year", "years"),
            plural(span.months.into(), "month", "months"),
            plural(span.days, "day", "days")
        )
        .into(),
        Err(_) => OutputValue::empty(),
    }
}

fn age_days(s: &Snapshot) -> OutputValue {
    match age_dates(s) {
        Ok((birth, as_of)) => ((as_of - birth).num_days() as f64).into(),
        Err(_) => OutputValue::ZERO,
    }
}

// ============================================================================
// Days between dates
// ============================================================================

const DAYS_READS: &[&str] = &["start", "end", "include_end"];

fn days_between_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("days-between-dates", "Days Between Dates", Category::DateTime)
        .description("Count the days between two dates.")
        .icon("calendar")
        .input(InputField::date("start", "Start Date").default_value("2024-01-01"))
        .input(InputField::date("end", "End Date").default_value("2024-12-31"))
        .input(InputField::checkbox("include_end", "Include end date"))
        .output(OutputField::new("Days", Formula::pure("days_between", DAYS_READS, days_between)).unit("days"))
        .output(OutputField::new("Weeks", Formula::pure("days_between_weeks", DAYS_READS, weeks_between)))
}

fn day_count(s: &Snapshot) -> Option<i64> {
    let (start, end) = (s.date("start")?, s.date("end")?);
    let days = (end - start).num_days();
    if s.flag("include_end") {
        Some(days + if days < 0 { -1 } else { 1 })
    } else {
        Some(days)
    }
}

fn days_between(s: &Snapshot) -> OutputValue {
    day_count(s).map_or(0.0, |d| d as f64).into()
}

fn weeks_between(s: &Snapshot) -> OutputValue {
    let Some(days) = day_count(s) else {
        return OutputValue::empty();
    };
    let sign = if days < 0 { "-" } else { "" };
    let days = days.abs();
    format!(
        "{}{}, {}",
        sign,
        plural(days / 7, "week", "weeks"),
        plural(days % 7, "day", "days")
    )
    .into()
}

// ============================================================================
// Time duration
// ============================================================================

const DURATION_READS: &[&str] = &["start_time", "end_time"];

fn time_duration_calculator() -> CalculatorDefinition {
    CalculatorDefinition::new("time-duration-calculator", "Time Duration Calculator", Category::DateTime)
        .description("Hours and minutes between two clock times, crossing midnight if needed.")
        .icon("clock")
        .input(InputField::time("start_time", "Start Time").default_value("09:00"))
        .input(InputField::time("end_time", "End Time").default_value("17:30"))
        .output(OutputField::new("Duration", Formula::pure("duration_text", DURATION_READS, duration_text)))
        .output(
            OutputField::new("Total Minutes", Formula::pure("duration_minutes", DURATION_READS, duration_minutes))
                .unit("min"),
        )
        .output(
            OutputField::new("Decimal Hours", Formula::pure("duration_hours", DURATION_READS, duration_hours))
                .unit("h"),
        )
}

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Whole minutes from start to end; an end before the start means the next day
fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let seconds = (end - start).num_seconds();
    let seconds = if seconds < 0 { seconds + SECONDS_PER_DAY } else { seconds };
    seconds / 60
}

fn duration(s: &Snapshot) -> Option<i64> {
    Some(minutes_between(s.time("start_time")?, s.time("end_time")?))
}

fn duration_text(s: &Snapshot) -> OutputValue {
    match duration(s) {
        Some(minutes) => format!(
            "{} {}",
            plural(minutes / 60, "hour", "hours"),
            plural(minutes % 60, "minute", "minutes")
        )
        .into(),
        None => OutputValue::empty(),
    }
}

fn duration_minutes(s: &Snapshot) -> OutputValue {
    duration(s).map_or(0.0, |m| m as f64).into()
}

fn duration_hours(s: &Snapshot) -> OutputValue {
    duration(s).map_or(0.0, |m| round_dp(m as f64 / 60.0, 2)).into()
}
