use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::PathfinderError;
use crate::types::{Money, Rate};
use crate::validation::{add, div, mul};
use crate::PathfinderResult;

const CONVERGENCE_THRESHOLD: Decimal = dec!(0.0000001);
const MAX_IRR_ITERATIONS: u32 = 100;

/// Newton steps are clamped to this band.
const MIN_IRR_RATE: Rate = dec!(-0.99);
const MAX_IRR_RATE: Rate = dec!(100);

/// Net Present Value of a series of annual cash flows, the first at t = 0.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> PathfinderResult<Money> {
    if rate <= dec!(-1) {
        return Err(PathfinderError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;
    let mut result = Decimal::ZERO;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount = mul("npv.discount_factor", discount, one_plus_r)?;
        }
        if discount.is_zero() {
            return Err(PathfinderError::DivisionByZero {
                context: format!("NPV discount factor at period {t}"),
            });
        }
        result = add("npv", result, div("npv", *cf, discount)?)?;
    }

    Ok(result)
}

/// Internal Rate of Return using Newton-Raphson.
///
/// Requires a sign change in the flows. A rate at which any present value
/// leaves the decimal range ends the search with `ConvergenceFailure`.
pub fn irr(cash_flows: &[Money], guess: Rate) -> PathfinderResult<Rate> {
    if cash_flows.len() < 2 {
        return Err(PathfinderError::InsufficientData(
            "IRR requires at least 2 cash flows".into(),
        ));
    }
    let has_positive = cash_flows.iter().any(|cf| *cf > Decimal::ZERO);
    let has_negative = cash_flows.iter().any(|cf| *cf < Decimal::ZERO);
    if !(has_positive && has_negative) {
        return Err(PathfinderError::InvalidInput {
            field: "cash_flows".into(),
            reason: "IRR requires at least one negative and one positive cash flow".into(),
        });
    }
    if guess < MIN_IRR_RATE || guess > MAX_IRR_RATE {
        return Err(PathfinderError::InvalidInput {
            field: "guess".into(),
            reason: format!("IRR guess must be between {MIN_IRR_RATE} and {MAX_IRR_RATE}"),
        });
    }

    let failure = |iterations: u32, last_delta: Decimal| PathfinderError::ConvergenceFailure {
        function: "IRR".into(),
        iterations,
        last_delta,
    };

    let mut rate = guess;
    let mut last_delta = Decimal::MAX;

    for i in 0..MAX_IRR_ITERATIONS {
        let (value, slope) =
            npv_with_slope(cash_flows, rate).ok_or_else(|| failure(i, last_delta))?;
        last_delta = value;

        if value.abs() < CONVERGENCE_THRESHOLD {
            return Ok(rate);
        }
        if slope.is_zero() {
            return Err(failure(i, value));
        }

        rate = value
            .checked_div(slope)
            .and_then(|step| rate.checked_sub(step))
            .ok_or_else(|| failure(i, value))?
            .clamp(MIN_IRR_RATE, MAX_IRR_RATE);
    }

    Err(failure(MAX_IRR_ITERATIONS, last_delta))
}

/// NPV at `rate` and its derivative with respect to the rate.
///
/// None when a term leaves the decimal range or the discount factor
/// rounds to zero.
fn npv_with_slope(cash_flows: &[Money], rate: Rate) -> Option<(Decimal, Decimal)> {
    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;
    let mut value = Decimal::ZERO;
    let mut slope = Decimal::ZERO;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount = discount.checked_mul(one_plus_r)?;
        }
        if discount.is_zero() {
            return None;
        }
        let pv = cf.checked_div(discount)?;
        value = value.checked_add(pv)?;
        // d/dr of cf·(1+r)^-t is -t·pv/(1+r)
        let term = Decimal::from(t as u64)
            .checked_mul(pv)?
            .checked_div(one_plus_r)?;
        slope = slope.checked_sub(term)?;
    }
    Some((value, slope))
}

/// Undiscounted payback period in years, linearly interpolated within the
/// year in which cumulative cash flow turns non-negative.
///
/// Returns `None` when the cumulative position never recovers.
pub fn payback_period(cash_flows: &[Money]) -> Option<Decimal> {
    let mut cumulative = Decimal::ZERO;
    for (t, cf) in cash_flows.iter().enumerate() {
        let previous = cumulative;
        cumulative = cumulative.checked_add(*cf)?;
        if cumulative >= Decimal::ZERO {
            if t == 0 {
                return Some(Decimal::ZERO);
            }
            // previous < 0 here, so cf > 0
            let fraction = (-previous).checked_div(*cf)?;
            return Some(Decimal::from(t as i64 - 1) + fraction);
        }
    }
    None
}
