//! Amount helpers for EUR values.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` values restricted to cents.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits in a EUR amount.
pub const CENT_SCALE: u32 = 2;

/// Largest amount a line or an entry total may carry: 9.999.999.999.999,99.
///
/// Matches the `NUMERIC(15, 2)` amount columns.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_7FFF, 0x0003_8D7E, 0, false, CENT_SCALE);

/// Returns true if `amount` does not exceed [`MAX_AMOUNT`] in magnitude.
#[must_use]
pub fn within_amount_limit(amount: Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT
}

/// Returns true if `amount` has no precision finer than one cent.
///
/// Trailing zeros do not count, so `10.500` is a valid cent amount.
#[must_use]
pub fn has_cent_precision(amount: Decimal) -> bool {
    amount.normalize().scale() <= CENT_SCALE
}

/// Formats an amount for display in the German locale (`de-DE`, EUR).
///
/// Uses `.` as thousands separator, `,` as decimal separator and a trailing
/// euro sign, e.g. `1.234,56 €`. Presentation only; ledger arithmetic never
/// goes through this function.
#[must_use]
pub fn format_eur_de(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CENT_SCALE);

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = rounded.abs().to_string();
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{frac_part} €")
}
