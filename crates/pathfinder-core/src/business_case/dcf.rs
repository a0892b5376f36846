use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value;
use crate::types::{Money, Percent, Rate};
use crate::validation::sum;
use crate::PathfinderResult;

use super::engine::RealizationYear;

const IRR_GUESS: Rate = dec!(0.10);

/// Metrics derived from the realization table by discounting, as opposed
/// to the configured display metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountedCashFlow {
    pub discount_rate: Rate,
    /// Net flow per year, index = year
    pub net_cash_flows: Vec<Money>,
    pub pv_benefits: Money,
    pub pv_costs: Money,
    /// Σ (benefit_t − cost_t) / (1 + r)^t
    pub npv: Money,
    /// Internal rate of return as a fraction
    pub irr: Option<Rate>,
    /// Undiscounted (Σ benefits − Σ costs) / Σ costs × 100
    pub roi: Option<Percent>,
    /// Years until cumulative net flow turns non-negative
    pub payback_period: Option<Decimal>,
    /// PV benefits / PV costs
    pub benefit_cost_ratio: Option<Decimal>,
}

pub fn discounted_cash_flow(
    yearly: &[RealizationYear],
    discount_rate: Rate,
    warnings: &mut Vec<String>,
) -> PathfinderResult<DiscountedCashFlow> {
    let benefits: Vec<Money> = yearly.iter().map(|y| y.benefits).collect();
    let costs: Vec<Money> = yearly.iter().map(|y| y.total_costs).collect();
    let net_cash_flows: Vec<Money> = yearly.iter().map(|y| y.net).collect();

    let pv_benefits = time_value::npv(discount_rate, &benefits)?;
    let pv_costs = time_value::npv(discount_rate, &costs)?;
    let npv = time_value::npv(discount_rate, &net_cash_flows)?;

    let irr = match time_value::irr(&net_cash_flows, IRR_GUESS) {
        Ok(rate) => Some(rate),
        Err(e) => {
            warnings.push(format!("IRR not available: {e}"));
            None
        }
    };

    let total_benefits = sum("dcf.total_benefits", benefits.iter().copied())?;
    let total_costs = sum("dcf.total_costs", costs.iter().copied())?;
    let roi = if total_costs.is_zero() {
        warnings.push("No costs in horizon; ROI is undefined".into());
        None
    } else {
        let roi = (total_benefits - total_costs)
            .checked_div(total_costs)
            .and_then(|r| r.checked_mul(dec!(100)));
        if roi.is_none() {
            warnings.push("ROI exceeds the representable range".into());
        }
        roi
    };

    let benefit_cost_ratio = if pv_costs.is_zero() {
        None
    } else {
        pv_benefits.checked_div(pv_costs)
    };

    let payback_period = time_value::payback_period(&net_cash_flows);
    if payback_period.is_none() {
        warnings.push("Cumulative net cash flow does not recover within the horizon".into());
    }

    Ok(DiscountedCashFlow {
        discount_rate,
        net_cash_flows,
        pv_benefits,
        pv_costs,
        npv,
        irr,
        roi,
        payback_period,
        benefit_cost_ratio,
    })
}
