use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PathfinderError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::validation::{
    div, invalid, mul, require_amount, require_fraction, require_range, sub, sum,
};
use crate::PathfinderResult;

/// Share of year-one training spend that recurs in later years.
const TRAINING_TAPER: Rate = dec!(0.2);

/// Largest accepted yearly multiplier on the initial investment.
const MAX_DECAY_FACTOR: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Cost categories as fractions of the initial investment.
///
/// Fractions are not required to sum to 1 and are never normalised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostStructure {
    pub implementation: Rate,
    pub licensing: Rate,
    pub support: Rate,
    pub maintenance: Rate,
    pub training: Rate,
    pub security: Rate,
}

impl CostStructure {
    pub(crate) fn validate(&self, prefix: &str) -> PathfinderResult<()> {
        for (name, value) in [
            ("implementation", self.implementation),
            ("licensing", self.licensing),
            ("support", self.support),
            ("maintenance", self.maintenance),
            ("training", self.training),
            ("security", self.security),
        ] {
            require_fraction(&format!("{prefix}.{name}"), value)?;
        }
        Ok(())
    }
}

/// One offering in a TCO comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferingInput {
    pub name: String,
    pub initial_investment: Money,
    pub cost_structure: CostStructure,
    /// Multiplier per year applied to the initial investment; first entry 1.0
    pub decay_factors: Vec<Decimal>,
}

/// Input for a two-offering TCO comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcoInput {
    /// Offering whose savings are being reported (A)
    pub subject: OfferingInput,
    /// Offering it is compared against (B)
    pub comparator: OfferingInput,
    /// Projection horizon in years
    pub years: u32,
}

/// Display decomposition of one year's spend.
///
/// The category fields are not guaranteed to sum to `total_cost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyCostBreakdown {
    pub year: u32,
    pub total_cost: Money,
    pub implementation: Money,
    pub licensing: Money,
    pub support: Money,
    pub maintenance: Money,
    pub training: Money,
    pub security: Money,
}

/// Side-by-side annual and running totals for charting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcoYearComparison {
    pub year: u32,
    pub subject_cost: Money,
    pub comparator_cost: Money,
    pub subject_cumulative: Money,
    pub comparator_cumulative: Money,
}

/// How the subject's TCO compares to the comparator's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TcoPosition {
    /// Subject is cheaper
    Savings { amount: Money, percentage: Percent },
    /// Subject is more expensive; amount and percentage are absolute values
    Premium { amount: Money, percentage: Percent },
    Parity,
}

impl TcoPosition {
    pub fn headline(&self) -> &'static str {
        match self {
            TcoPosition::Savings { .. } => "Projected Savings",
            TcoPosition::Premium { .. } => "Premium",
            TcoPosition::Parity => "Parity",
        }
    }
}

/// Output of the TCO comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcoOutput {
    pub subject_name: String,
    pub comparator_name: String,
    pub years: u32,
    pub subject_breakdown: Vec<YearlyCostBreakdown>,
    pub comparator_breakdown: Vec<YearlyCostBreakdown>,
    pub yearly_comparison: Vec<TcoYearComparison>,
    pub subject_total_cost: Money,
    pub comparator_total_cost: Money,
    /// comparator total − subject total
    pub savings: Money,
    /// savings as a percentage of the comparator total
    pub savings_percentage: Percent,
    pub position: TcoPosition,
    pub headline: String,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Project multi-year total cost of ownership for two offerings.
///
/// Year y spend = initial_investment × decay_factors[y]. The per-category
/// breakdown front-loads implementation (year 1 only) and training (full in
/// year 1, 20% thereafter); the remaining categories scale with the decay
/// factor.
pub fn compare_tco(input: &TcoInput) -> PathfinderResult<ComputationOutput<TcoOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    tracing::debug!(
        subject = %input.subject.name,
        comparator = %input.comparator.name,
        years = input.years,
        "comparing total cost of ownership"
    );

    if input.years == 0 {
        return Err(invalid("years", "Horizon must be at least 1 year"));
    }
    validate_offering("subject", &input.subject, input.years, &mut warnings)?;
    validate_offering("comparator", &input.comparator, input.years, &mut warnings)?;

    let subject_breakdown = project_offering(&input.subject, input.years)?;
    let comparator_breakdown = project_offering(&input.comparator, input.years)?;

    let subject_total_cost = sum(
        "subject_total_cost",
        subject_breakdown.iter().map(|y| y.total_cost),
    )?;
    let comparator_total_cost = sum(
        "comparator_total_cost",
        comparator_breakdown.iter().map(|y| y.total_cost),
    )?;

    if comparator_total_cost.is_zero() {
        return Err(PathfinderError::DivisionByZero {
            context: "savings percentage (comparator total cost is zero)".into(),
        });
    }

    let savings = sub("savings", comparator_total_cost, subject_total_cost)?;
    let savings_percentage = mul(
        "savings_percentage",
        div("savings_percentage", savings, comparator_total_cost)?,
        dec!(100),
    )?;

    let position = if savings > Decimal::ZERO {
        TcoPosition::Savings {
            amount: savings,
            percentage: savings_percentage,
        }
    } else if savings < Decimal::ZERO {
        TcoPosition::Premium {
            amount: savings.abs(),
            percentage: savings_percentage.abs(),
        }
    } else {
        TcoPosition::Parity
    };

    let mut subject_cumulative = Decimal::ZERO;
    let mut comparator_cumulative = Decimal::ZERO;
    let yearly_comparison = subject_breakdown
        .iter()
        .zip(comparator_breakdown.iter())
        .map(|(a, b)| {
            subject_cumulative += a.total_cost;
            comparator_cumulative += b.total_cost;
            TcoYearComparison {
                year: a.year,
                subject_cost: a.total_cost,
                comparator_cost: b.total_cost,
                subject_cumulative,
                comparator_cumulative,
            }
        })
        .collect();

    let output = TcoOutput {
        subject_name: input.subject.name.clone(),
        comparator_name: input.comparator.name.clone(),
        years: input.years,
        subject_breakdown,
        comparator_breakdown,
        yearly_comparison,
        subject_total_cost,
        comparator_total_cost,
        savings,
        savings_percentage,
        headline: position.headline().to_string(),
        position,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Multi-year TCO comparison from cost-category fractions and yearly decay factors",
        &serde_json::json!({
            "years": input.years,
            "subject_initial_investment": input.subject.initial_investment.to_string(),
            "comparator_initial_investment": input.comparator.initial_investment.to_string(),
            "training_taper": TRAINING_TAPER.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Per-year breakdown for one offering over `years`.
///
/// Callers must have checked that `decay_factors` covers the horizon.
pub fn project_offering(
    offering: &OfferingInput,
    years: u32,
) -> PathfinderResult<Vec<YearlyCostBreakdown>> {
    let inv = offering.initial_investment;
    let cs = &offering.cost_structure;
    let ctx = format!("{}.breakdown", offering.name);
    let share =
        |fraction: Decimal, factor: Decimal| mul(&ctx, mul(&ctx, inv, fraction)?, factor);

    offering
        .decay_factors
        .iter()
        .take(years as usize)
        .enumerate()
        .map(|(idx, &factor)| {
            let first_year = idx == 0;
            Ok(YearlyCostBreakdown {
                year: idx as u32 + 1,
                total_cost: mul(&ctx, inv, factor)?,
                implementation: if first_year {
                    share(cs.implementation, Decimal::ONE)?
                } else {
                    Decimal::ZERO
                },
                licensing: share(cs.licensing, factor)?,
                support: share(cs.support, factor)?,
                maintenance: share(cs.maintenance, factor)?,
                training: if first_year {
                    share(cs.training, Decimal::ONE)?
                } else {
                    share(cs.training, TRAINING_TAPER)?
                },
                security: share(cs.security, factor)?,
            })
        })
        .collect::<PathfinderResult<Vec<_>>>()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_offering(
    prefix: &str,
    offering: &OfferingInput,
    years: u32,
    warnings: &mut Vec<String>,
) -> PathfinderResult<()> {
    require_amount(&format!("{prefix}.initial_investment"), offering.initial_investment)?;
    offering
        .cost_structure
        .validate(&format!("{prefix}.cost_structure"))?;

    if offering.decay_factors.len() < years as usize {
        return Err(invalid(
            &format!("{prefix}.decay_factors"),
            &format!(
                "{} decay factors supplied but {years} years requested",
                offering.decay_factors.len()
            ),
        ));
    }
    for (idx, factor) in offering.decay_factors.iter().take(years as usize).enumerate() {
        require_range(
            &format!("{prefix}.decay_factors[{idx}]"),
            *factor,
            Decimal::ZERO,
            MAX_DECAY_FACTOR,
        )?;
    }
    if let Some(first) = offering.decay_factors.first() {
        if *first != Decimal::ONE {
            warnings.push(format!(
                "{} decay factor for year 1 is {first}, expected 1.0",
                offering.name
            ));
        }
    }
    Ok(())
}
