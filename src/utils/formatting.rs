//! Formatting utilities used for CLI and export outputs.

use crate::models::IndicatorUnit;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn italic(s: &str) -> String {
    format!("\x1b[3m{}\x1b[0m", s)
}

/// Whole number with `.` as thousands separator: 1234567 → "1.234.567".
fn group_thousands(value: f64) -> String {
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Two decimals at most, trailing zeros dropped: 0.30000000000000004 → "0.3".
fn trim_decimals(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

/// Render a value in its indicator unit.
///
/// Currency drops the cents and groups thousands (`R$ 130.000`). Percent and
/// plain numbers keep up to two decimals.
pub fn format_value(value: f64, unit: IndicatorUnit, currency_symbol: &str) -> String {
    match unit {
        IndicatorUnit::Currency => {
            let sign = if value.round() < 0.0 { "-" } else { "" };
            format!("{sign}{currency_symbol} {}", group_thousands(value))
        }
        IndicatorUnit::Percent => format!("{}%", trim_decimals(value)),
        IndicatorUnit::Number => trim_decimals(value),
    }
}

/// Contribution with an explicit sign: `+R$ 5.000`, `-3`.
pub fn format_contribution(value: f64, unit: IndicatorUnit, currency_symbol: &str) -> String {
    let body = format_value(value.abs(), unit, currency_symbol);
    if value < 0.0 {
        format!("-{body}")
    } else {
        format!("+{body}")
    }
}

