use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PathfinderError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::{
    add, div, invalid, mul, require_amount, require_percent, require_positive, require_range, sub,
};
use crate::PathfinderResult;

use super::scenarios::{GrowthScenario, SliderSettings};

const MAX_HORIZON_YEARS: u32 = 30;

/// Share drift per point of growth above the market: 1/10 of a share point.
const SHARE_DRIFT_DIVISOR: Decimal = dec!(10);

/// Ceiling on any growth rate or boost, percent per year.
const MAX_GROWTH_RATE: Percent = dec!(100);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthInput {
    pub scenario: GrowthScenario,
    pub sliders: SliderSettings,
    pub horizon_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRow {
    pub year: u32,
    /// Revenue compounding at the baseline rate only
    pub baseline_revenue: Money,
    /// Revenue compounding at the boosted target rate
    pub projected_revenue: Money,
    /// Market share under the target rate, percent
    pub market_share: Percent,
    /// Market share under the baseline rate, percent
    pub baseline_market_share: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthOutput {
    pub scenario: String,
    pub investment_factor: Decimal,
    pub execution_factor: Decimal,
    pub competitive_factor: Decimal,
    pub adjusted_boost: Percent,
    pub target_growth_rate: Percent,
    pub rows: Vec<GrowthRow>,
    /// Final projected revenue vs. starting revenue, percent
    pub total_growth_pct: Percent,
    /// Final projected revenue minus final baseline-only revenue
    pub additional_revenue: Money,
    pub final_market_share: Percent,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Compound a scenario's baseline growth plus a slider-scaled boost.
///
/// adjusted_boost = boost × investment/100 × speed/100 × (1 − pressure/100)
/// target = baseline_growth + adjusted_boost
/// revenue_y = revenue_{y-1} × (1 + target/100)
/// share_y = share_{y-1} + (target − market_growth)/10
pub fn project_growth(input: &GrowthInput) -> PathfinderResult<ComputationOutput<GrowthOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    tracing::debug!(
        scenario = %input.scenario.name,
        horizon = input.horizon_years,
        investment = %input.sliders.investment_level,
        speed = %input.sliders.execution_speed,
        pressure = %input.sliders.competitive_pressure,
        "projecting growth scenario"
    );

    validate_growth_input(input)?;

    let scenario = &input.scenario;
    let investment_factor = input.sliders.investment_level / dec!(100);
    let execution_factor = input.sliders.execution_speed / dec!(100);
    let competitive_factor = Decimal::ONE - input.sliders.competitive_pressure / dec!(100);

    let adjusted_boost =
        scenario.growth_boost * investment_factor * execution_factor * competitive_factor;
    let target_growth_rate = scenario.baseline_growth_rate + adjusted_boost;

    let rows = trajectory(scenario, target_growth_rate, input.horizon_years)?;

    // rows always holds year 0..=horizon
    let last = rows.last().cloned().ok_or_else(|| {
        PathfinderError::InsufficientData("Projection produced no rows".into())
    })?;

    if last.market_share < Decimal::ZERO || last.market_share > dec!(100) {
        warnings.push(format!(
            "Projected market share {}% falls outside 0–100%; the share drift rule is linear and unbounded",
            last.market_share.round_dp(2)
        ));
    }

    let growth_ratio = div(
        "total_growth_pct",
        last.projected_revenue,
        scenario.baseline_revenue,
    )?;
    let total_growth_pct = mul("total_growth_pct", growth_ratio - Decimal::ONE, dec!(100))?;
    let additional_revenue = sub(
        "additional_revenue",
        last.projected_revenue,
        last.baseline_revenue,
    )?;

    let output = GrowthOutput {
        scenario: scenario.name.clone(),
        investment_factor,
        execution_factor,
        competitive_factor,
        adjusted_boost,
        target_growth_rate,
        total_growth_pct,
        additional_revenue,
        final_market_share: last.market_share,
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compounded growth with slider-scaled boost and linear market-share drift",
        &serde_json::json!({
            "scenario": scenario.name,
            "baseline_growth_rate": scenario.baseline_growth_rate.to_string(),
            "growth_boost": scenario.growth_boost.to_string(),
            "market_growth_rate": scenario.market_growth_rate.to_string(),
            "horizon_years": input.horizon_years,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Year-by-year rows from year 0 (baseline values) to `horizon`.
///
/// Fails with `InvalidInput` if compounding leaves the decimal range.
pub fn trajectory(
    scenario: &GrowthScenario,
    target_growth_rate: Percent,
    horizon: u32,
) -> PathfinderResult<Vec<GrowthRow>> {
    let target_multiplier = Decimal::ONE + target_growth_rate / dec!(100);
    let baseline_multiplier = Decimal::ONE + scenario.baseline_growth_rate / dec!(100);
    let target_drift = (target_growth_rate - scenario.market_growth_rate) / SHARE_DRIFT_DIVISOR;
    let baseline_drift =
        (scenario.baseline_growth_rate - scenario.market_growth_rate) / SHARE_DRIFT_DIVISOR;

    let mut row = GrowthRow {
        year: 0,
        baseline_revenue: scenario.baseline_revenue,
        projected_revenue: scenario.baseline_revenue,
        market_share: scenario.baseline_market_share,
        baseline_market_share: scenario.baseline_market_share,
    };
    let mut rows = Vec::with_capacity(horizon as usize + 1);
    rows.push(row.clone());

    for year in 1..=horizon {
        row = GrowthRow {
            year,
            baseline_revenue: mul("baseline_revenue", row.baseline_revenue, baseline_multiplier)?,
            projected_revenue: mul("projected_revenue", row.projected_revenue, target_multiplier)?,
            market_share: add("market_share", row.market_share, target_drift)?,
            baseline_market_share: add(
                "baseline_market_share",
                row.baseline_market_share,
                baseline_drift,
            )?,
        };
        rows.push(row.clone());
    }
    Ok(rows)
}

fn validate_growth_input(input: &GrowthInput) -> PathfinderResult<()> {
    input.sliders.validate()?;
    if input.horizon_years == 0 || input.horizon_years > MAX_HORIZON_YEARS {
        return Err(invalid(
            "horizon_years",
            &format!("Horizon must be between 1 and {MAX_HORIZON_YEARS} years"),
        ));
    }
    let s = &input.scenario;
    if s.baseline_revenue.is_zero() {
        return Err(PathfinderError::DivisionByZero {
            context: "growth percentage (baseline revenue is zero)".into(),
        });
    }
    require_positive("scenario.baseline_revenue", s.baseline_revenue)?;
    require_amount("scenario.baseline_revenue", s.baseline_revenue)?;
    require_percent("scenario.baseline_market_share", s.baseline_market_share)?;
    require_range(
        "scenario.growth_boost",
        s.growth_boost,
        Decimal::ZERO,
        MAX_GROWTH_RATE,
    )?;
    for (field, rate) in [
        ("scenario.baseline_growth_rate", s.baseline_growth_rate),
        ("scenario.market_growth_rate", s.market_growth_rate),
    ] {
        if rate <= dec!(-100) || rate > MAX_GROWTH_RATE {
            return Err(invalid(
                field,
                &format!("Growth rate must be greater than -100% and at most {MAX_GROWTH_RATE}%"),
            ));
        }
    }
    Ok(())
}
