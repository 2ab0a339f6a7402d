//! # Precision and Display Helpers
//!
//! Rounding is chosen per output, never globally. These helpers cover the
//! two styles the catalogue uses (fixed decimal places and significant
//! figures) plus the feet-and-inches display used by length conversions.
//!
//! ## Example
//!
//! ```rust
//! use calckit_core::precision::{format_feet_inches, round_dp, round_sig};
//!
//! assert_eq!(round_dp(5.741469, 4), 5.7415);
//! assert_eq!(round_sig(123456.0, 3), 123000.0);
//! assert_eq!(format_feet_inches(68.9), "5' 9\"");
//! ```

/// Largest decimal-place count accepted by [`round_dp`]
const MAX_DECIMALS: u32 = 12;

/// Round to a fixed number of decimal places (half away from zero).
///
/// Non-finite input is returned unchanged.
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Round to a number of significant figures.
pub fn round_sig(value: f64, figures: u32) -> f64 {
    if value == 0.0 || !value.is_finite() || figures == 0 {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let shift = figures as i32 - 1 - magnitude;
    // Divide by exact powers of ten on both sides so 99000 stays 99000
    let rounded = if shift >= 0 {
        let factor = 10f64.powi(shift);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-shift);
        (value / factor).round() * factor
    };
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Shortest display form of a number: `12` rather than `12.0`, and never `-0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Render a length given in inches as feet and whole inches, e.g. `5' 9"`.
///
/// Inches are rounded to the nearest whole inch; 11.6" carries into the
/// next foot rather than displaying as 12".
pub fn format_feet_inches(total_inches: f64) -> String {
    if !total_inches.is_finite() {
        return "0' 0\"".to_string();
    }
    let sign = if total_inches < 0.0 { "-" } else { "" };
    let rounded = total_inches.abs().round();
    let feet = (rounded / 12.0).floor();
    let inches = rounded - feet * 12.0;
    format!("{}{}' {}\"", sign, feet as u64, inches as u64)
}
