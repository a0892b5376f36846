//! Numeric boundary checks shared by every calculation. Each failure is an
//! `InvalidInput` naming the offending field.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::error::PathfinderError;
use crate::PathfinderResult;

/// Parse a user-supplied numeric string into a `Decimal`.
///
/// Accepts plain and scientific notation; surrounding whitespace is ignored.
/// Empty strings are rejected rather than coerced to zero.
pub fn parse_decimal(field: &str, raw: &str) -> PathfinderResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid(field, "Value is empty"));
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| invalid(field, &format!("'{trimmed}' is not a number")))
}

pub fn require_non_negative(field: &str, value: Decimal) -> PathfinderResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, "Value cannot be negative"));
    }
    Ok(())
}

pub fn require_positive(field: &str, value: Decimal) -> PathfinderResult<()> {
    if value <= Decimal::ZERO {
        return Err(invalid(field, "Value must be positive"));
    }
    Ok(())
}

/// Inclusive range check.
pub fn require_range(field: &str, value: Decimal, min: Decimal, max: Decimal) -> PathfinderResult<()> {
    if value < min || value > max {
        return Err(invalid(
            field,
            &format!("Value {value} must be between {min} and {max}"),
        ));
    }
    Ok(())
}

/// Fractions such as confidence weights and cost-category shares.
pub fn require_fraction(field: &str, value: Decimal) -> PathfinderResult<()> {
    require_range(field, value, Decimal::ZERO, Decimal::ONE)
}

/// Values on the 0–100 scale (sliders, confidence level, ramp-up).
pub fn require_percent(field: &str, value: Decimal) -> PathfinderResult<()> {
    require_range(field, value, Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Largest monetary amount accepted on any input field (10^15).
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// A non-negative amount no larger than `MAX_AMOUNT`.
pub fn require_amount(field: &str, value: Decimal) -> PathfinderResult<()> {
    require_range(field, value, Decimal::ZERO, MAX_AMOUNT)
}

/// A signed amount whose magnitude is no larger than `MAX_AMOUNT`.
pub fn require_signed_amount(field: &str, value: Decimal) -> PathfinderResult<()> {
    require_range(field, value, -MAX_AMOUNT, MAX_AMOUNT)
}

// ---------------------------------------------------------------------------
// Overflow-checked arithmetic: an overflow becomes `InvalidInput` naming
// the computation.
// ---------------------------------------------------------------------------

pub(crate) fn overflow(context: &str) -> PathfinderError {
    invalid(context, "Result exceeds the representable decimal range")
}

pub(crate) fn mul(context: &str, a: Decimal, b: Decimal) -> PathfinderResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(context))
}

pub(crate) fn div(context: &str, a: Decimal, b: Decimal) -> PathfinderResult<Decimal> {
    a.checked_div(b).ok_or_else(|| overflow(context))
}

pub(crate) fn add(context: &str, a: Decimal, b: Decimal) -> PathfinderResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(context))
}

pub(crate) fn sub(context: &str, a: Decimal, b: Decimal) -> PathfinderResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(context))
}

pub(crate) fn sum<I>(context: &str, values: I) -> PathfinderResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| add(context, acc, v))
}

pub(crate) fn invalid(field: &str, reason: &str) -> PathfinderError {
    PathfinderError::InvalidInput {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_scientific() {
        assert_eq!(parse_decimal("x", " 1250000 ").unwrap(), dec!(1250000));
        assert_eq!(parse_decimal("x", "0.85").unwrap(), dec!(0.85));
        assert_eq!(parse_decimal("x", "1.5e3").unwrap(), dec!(1500));
    }

    #[test]
    fn test_parse_rejects_garbage_and_empty() {
        assert!(parse_decimal("x", "abc").is_err());
        assert!(parse_decimal("x", "").is_err());
        assert!(parse_decimal("x", "NaN").is_err());
    }

    #[test]
    fn test_error_names_field() {
        match parse_decimal("investment_level", "lots") {
            Err(PathfinderError::InvalidInput { field, .. }) => {
                assert_eq!(field, "investment_level")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_ranges() {
        assert!(require_fraction("f", dec!(1)).is_ok());
        assert!(require_fraction("f", dec!(1.01)).is_err());
        assert!(require_percent("p", dec!(0)).is_ok());
        assert!(require_percent("p", dec!(100.5)).is_err());
        assert!(require_non_negative("n", dec!(-0.01)).is_err());
        assert!(require_positive("n", Decimal::ZERO).is_err());
    }

    #[test]
    fn test_amount_bounds() {
        assert!(require_amount("a", MAX_AMOUNT).is_ok());
        assert!(require_amount("a", MAX_AMOUNT + Decimal::ONE).is_err());
        assert!(require_amount("a", dec!(-1)).is_err());
        assert!(require_signed_amount("a", -MAX_AMOUNT).is_ok());
    }

    #[test]
    fn test_checked_ops_report_overflow() {
        assert!(mul("m", Decimal::MAX, dec!(2)).is_err());
        assert!(add("a", Decimal::MAX, Decimal::ONE).is_err());
        assert!(div("d", Decimal::MAX, dec!(0.1)).is_err());
        assert!(div("d", Decimal::ONE, Decimal::ZERO).is_err());
        assert!(sum("s", [Decimal::MAX, Decimal::MAX]).is_err());
        assert_eq!(sum("s", [dec!(1.5), dec!(2.5)]).unwrap(), dec!(4));
    }
}
