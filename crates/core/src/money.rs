//! Money
//!
//! Amounts are carried as unsigned minor units (cents) and only turned into
//! [`Money`] values for display.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Currency every storefront amount is denominated in.
pub const CURRENCY: &Currency = rusty_money::iso::USD;

/// Errors raised by amount arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// Percentage calculation could not be safely converted back to minor units.
    #[error("percentage could not be applied to {0} minor units")]
    PercentConversion(u64),

    /// Summing amounts overflowed.
    #[error("amount overflowed")]
    Overflow,
}

/// Applies `percent` to an amount, rounding half away from zero to the nearest
/// minor unit.
///
/// # Errors
///
/// Returns [`AmountError::PercentConversion`] if the result does not fit.
pub fn percent_of_minor(percent: &Percentage, minor: u64) -> Result<u64, AmountError> {
    ((*percent) * Decimal::ONE)
        .checked_mul(Decimal::from(minor))
        .ok_or(AmountError::PercentConversion(minor))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(AmountError::PercentConversion(minor))
}

/// Formats an amount of minor units in the storefront currency, e.g. `$14.79`.
pub fn format_amount(minor: u64) -> String {
    match i64::try_from(minor) {
        Ok(minor) => Money::from_minor(minor, CURRENCY).to_string(),
        Err(_overflow) => format!("{minor} {}", CURRENCY.iso_alpha_code),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn eight_percent_of_ten_dollars() -> TestResult {
        let tax = percent_of_minor(&Percentage::from(0.08), 10_00)?;

        assert_eq!(tax, 80);

        Ok(())
    }

    #[test]
    fn rounds_half_away_from_zero() -> TestResult {
        // 8% of 12.99 is 1.0392
        assert_eq!(percent_of_minor(&Percentage::from(0.08), 12_99)?, 1_04);
        // 50% of 0.05 is 0.025
        assert_eq!(percent_of_minor(&Percentage::from(0.5), 5)?, 3);

        Ok(())
    }

    #[test]
    fn format_amount_contains_major_and_minor_units() {
        let formatted = format_amount(14_79);

        assert!(formatted.contains("14.79"), "unexpected format: {formatted}");
    }
}
