//! Shared arithmetic and formatting helpers for the regime calculators.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Used for percentages shown to the user; rupee amounts are kept exact.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(21.66666)), dec!(21.67));
/// assert_eq!(round_half_up(dec!(3.055)), dec!(3.06));
/// assert_eq!(round_half_up(dec!(3.054)), dec!(3.05));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Floors a value at zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-10)), dec!(0));
/// assert_eq!(non_negative(dec!(10)), dec!(10));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// `part / whole × 100`, rounded to two places. Returns zero when `whole`
/// is zero or negative.
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_half_up(part / whole * Decimal::ONE_HUNDRED)
}

/// Formats a rupee amount rounded to whole rupees with thousands separators.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::format_rupees;
///
/// assert_eq!(format_rupees(dec!(150000)), "₹150,000");
/// assert_eq!(format_rupees(dec!(6760.40)), "₹6,760");
/// assert_eq!(format_rupees(dec!(0)), "₹0");
/// ```
pub fn format_rupees(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .trunc();
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Formats a percentage, dropping insignificant trailing zeros (`5%`, `21.67%`).
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", value.normalize())
}
