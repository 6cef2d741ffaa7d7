//! Display formatting for amounts, rates and carbon offsets.
//!
//! Output is fixed en-US style: `,` groups thousands and `.` separates decimals.

use common::CURRENCY_SYMBOL;
use rust_decimal::{Decimal, RoundingStrategy};

const CARBON_UNIT: &str = "tonnes CO₂";

/// Formats an amount of $NUC.
///
/// Rounded to at most two decimals with trailing zeros dropped: "25,000 $NUC",
/// "1,234.5 $NUC", "1,234.56 $NUC".
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_half_up(amount, 2).normalize();
    format!("{} {}", group_thousands(&rounded.to_string()), CURRENCY_SYMBOL)
}

/// `value` with exactly `decimals` places and grouped thousands ("1,000.00").
pub fn format_grouped(value: Decimal, decimals: u32) -> String {
    group_thousands(&format_fixed(value, decimals))
}

/// `value` with a fixed number of decimal places and a `%` suffix.
pub fn format_percentage(value: Decimal, decimals: u32) -> String {
    format!("{}%", format_fixed(value, decimals))
}

/// Two-place percentage with an explicit `+` for non-negative values.
pub fn format_signed_percentage(value: Decimal) -> String {
    let formatted = format_percentage(value, 2);
    if formatted.starts_with('-') {
        formatted
    } else {
        format!("+{formatted}")
    }
}

/// Formats an annual rate stored as a fraction (0.045 is "4.50%").
pub fn format_roi_rate(rate: Decimal) -> String {
    format_percentage(rate * Decimal::ONE_HUNDRED, 2)
}

/// Formats tonnes of CO₂, switching to thousands at 1000 tonnes.
pub fn format_carbon_offset(tonnes: Decimal) -> String {
    if tonnes >= Decimal::ONE_THOUSAND {
        format!("{}k {}", format_fixed(tonnes / Decimal::ONE_THOUSAND, 2), CARBON_UNIT)
    } else {
        format!("{} {}", format_fixed(tonnes, 2), CARBON_UNIT)
    }
}

fn round_half_up(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// `value` rounded half away from zero to exactly `decimals` places. Never renders "-0".
pub fn format_fixed(value: Decimal, decimals: u32) -> String {
    let mut value = round_half_up(value, decimals);
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    value.rescale(decimals);
    value.to_string()
}

/// Inserts `,` between groups of three integer digits.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
