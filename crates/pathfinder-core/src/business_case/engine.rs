use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::PathfinderError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::validation::{invalid, require_percent, require_signed_amount};
use crate::PathfinderResult;

use super::dcf::{discounted_cash_flow, DiscountedCashFlow};
use super::items::{Benefit, BusinessCase, ConfidenceLevel, Cost, CostType};
use super::scenarios::{build_scenario_table, default_case_scenarios, CaseScenario, ScenarioTable};

const MAX_HORIZON_YEARS: u32 = 30;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Headline metrics of a business case.
///
/// In the dashboard these are configured values, not derived from the
/// line items; `DiscountedCashFlow` holds the derived equivalents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    pub npv: Money,
    /// Percent
    pub roi: Percent,
    /// Percent
    pub irr: Percent,
    /// Years
    pub payback_period: Decimal,
    pub benefit_cost_ratio: Decimal,
}

impl Default for FinancialMetrics {
    fn default() -> Self {
        Self {
            npv: dec!(2400000),
            roi: dec!(185),
            irr: dec!(42),
            payback_period: dec!(2.1),
            benefit_cost_ratio: dec!(2.85),
        }
    }
}

impl FinancialMetrics {
    /// Scale value metrics by confidence; payback is carried unchanged.
    pub fn risk_adjusted(&self, confidence_level: Percent) -> Self {
        let factor = confidence_level / dec!(100);
        Self {
            npv: self.npv * factor,
            roi: self.roi * factor,
            irr: self.irr * factor,
            payback_period: self.payback_period,
            benefit_cost_ratio: self.benefit_cost_ratio * factor,
        }
    }
}

fn default_confidence_level() -> Percent {
    dec!(100)
}

fn default_horizon() -> u32 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessCaseInput {
    pub benefits: Vec<Benefit>,
    pub costs: Vec<Cost>,
    #[serde(default)]
    pub baseline_metrics: FinancialMetrics,
    /// Confidence slider, 0–100
    #[serde(default = "default_confidence_level")]
    pub confidence_level: Percent,
    /// Last year of the realization table (year 0 is included)
    #[serde(default = "default_horizon")]
    pub horizon_years: u32,
    /// Replaces the default best/expected/delayed/worst table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenarios: Option<Vec<CaseScenario>>,
    /// Enables the discounted-cash-flow block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<Rate>,
}

impl BusinessCaseInput {
    /// Evaluate an edited business case with default settings.
    pub fn from_case(case: &BusinessCase) -> Self {
        Self {
            benefits: case.benefits.clone(),
            costs: case.costs.clone(),
            baseline_metrics: FinancialMetrics::default(),
            confidence_level: default_confidence_level(),
            horizon_years: default_horizon(),
            scenarios: None,
            discount_rate: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealizationYear {
    pub year: u32,
    /// Ramp-adjusted benefits realised this year
    pub benefits: Money,
    pub one_time_costs: Money,
    pub recurring_costs: Money,
    pub total_costs: Money,
    pub net: Money,
    pub cumulative_net: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub annual_value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceTotal {
    pub confidence_level: ConfidenceLevel,
    pub annual_value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessCaseOutput {
    /// Σ nominal annual value (not ramp-adjusted)
    pub total_annual_benefits: Money,
    pub total_costs: Money,
    pub recurring_costs: Money,
    pub one_time_costs: Money,
    pub benefits_by_category: Vec<CategoryTotal>,
    pub benefits_by_confidence: Vec<ConfidenceTotal>,
    pub realization: Vec<RealizationYear>,
    pub baseline_metrics: FinancialMetrics,
    pub confidence_level: Percent,
    pub risk_adjusted_metrics: FinancialMetrics,
    pub scenarios: ScenarioTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_cash_flow: Option<DiscountedCashFlow>,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Aggregate itemised benefits and costs into headline totals, a ramped
/// realization table, confidence-scaled metrics and the scenario table.
pub fn evaluate_business_case(
    input: &BusinessCaseInput,
) -> PathfinderResult<ComputationOutput<BusinessCaseOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    tracing::debug!(
        benefits = input.benefits.len(),
        costs = input.costs.len(),
        confidence = %input.confidence_level,
        horizon = input.horizon_years,
        discounted = input.discount_rate.is_some(),
        "evaluating business case"
    );

    validate_business_case_input(input, &mut warnings)?;

    let total_annual_benefits: Money = input.benefits.iter().map(|b| b.annual_value).sum();
    let total_costs: Money = input.costs.iter().map(|c| c.amount).sum();
    let recurring_costs: Money = input
        .costs
        .iter()
        .filter(|c| c.cost_type == CostType::Recurring)
        .map(|c| c.amount)
        .sum();
    let one_time_costs = total_costs - recurring_costs;

    let realization = build_realization(&input.benefits, &input.costs, input.horizon_years);

    let risk_adjusted_metrics = input.baseline_metrics.risk_adjusted(input.confidence_level);

    let scenario_defs = input
        .scenarios
        .clone()
        .unwrap_or_else(default_case_scenarios);
    let scenarios = build_scenario_table(&input.baseline_metrics, &scenario_defs)?;

    let discounted_cash_flow = match input.discount_rate {
        Some(rate) => Some(discounted_cash_flow(&realization, rate, &mut warnings)?),
        None => None,
    };

    let output = BusinessCaseOutput {
        total_annual_benefits,
        total_costs,
        recurring_costs,
        one_time_costs,
        benefits_by_category: totals_by_category(&input.benefits),
        benefits_by_confidence: totals_by_confidence(&input.benefits),
        realization,
        baseline_metrics: input.baseline_metrics.clone(),
        confidence_level: input.confidence_level,
        risk_adjusted_metrics,
        scenarios,
        discounted_cash_flow,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Business case aggregation with ramp-up realization and scenario table",
        &serde_json::json!({
            "confidence_level": input.confidence_level.to_string(),
            "horizon_years": input.horizon_years,
            "discount_rate": input.discount_rate.map(|r| r.to_string()),
            "custom_scenarios": input.scenarios.is_some(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Year 0..=horizon realization table.
pub fn build_realization(benefits: &[Benefit], costs: &[Cost], horizon: u32) -> Vec<RealizationYear> {
    let mut cumulative_net = Decimal::ZERO;
    (0..=horizon)
        .map(|year| {
            let realized: Money = benefits.iter().map(|b| b.realized_in(year)).sum();
            let one_time: Money = costs
                .iter()
                .filter(|c| c.cost_type == CostType::OneTime)
                .map(|c| c.incurred_in(year))
                .sum();
            let recurring: Money = costs
                .iter()
                .filter(|c| c.cost_type == CostType::Recurring)
                .map(|c| c.incurred_in(year))
                .sum();
            let total_costs = one_time + recurring;
            let net = realized - total_costs;
            cumulative_net += net;
            RealizationYear {
                year,
                benefits: realized,
                one_time_costs: one_time,
                recurring_costs: recurring,
                total_costs,
                net,
                cumulative_net,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn totals_by_category(benefits: &[Benefit]) -> Vec<CategoryTotal> {
    let mut map: BTreeMap<&str, Money> = BTreeMap::new();
    for b in benefits {
        *map.entry(b.category.as_str()).or_insert(Decimal::ZERO) += b.annual_value;
    }
    map.into_iter()
        .map(|(category, annual_value)| CategoryTotal {
            category: category.to_string(),
            annual_value,
        })
        .collect()
}

fn totals_by_confidence(benefits: &[Benefit]) -> Vec<ConfidenceTotal> {
    [ConfidenceLevel::High, ConfidenceLevel::Medium, ConfidenceLevel::Low]
        .into_iter()
        .map(|level| ConfidenceTotal {
            confidence_level: level,
            annual_value: benefits
                .iter()
                .filter(|b| b.confidence_level == level)
                .map(|b| b.annual_value)
                .sum(),
        })
        .collect()
}

fn validate_business_case_input(
    input: &BusinessCaseInput,
    warnings: &mut Vec<String>,
) -> PathfinderResult<()> {
    if input.benefits.is_empty() && input.costs.is_empty() {
        return Err(PathfinderError::InsufficientData(
            "Business case needs at least one benefit or cost".into(),
        ));
    }
    require_percent("confidence_level", input.confidence_level)?;
    let m = &input.baseline_metrics;
    for (name, value) in [
        ("npv", m.npv),
        ("roi", m.roi),
        ("irr", m.irr),
        ("payback_period", m.payback_period),
        ("benefit_cost_ratio", m.benefit_cost_ratio),
    ] {
        require_signed_amount(&format!("baseline_metrics.{name}"), value)?;
    }
    if input.horizon_years == 0 || input.horizon_years > MAX_HORIZON_YEARS {
        return Err(invalid(
            "horizon_years",
            &format!("Horizon must be between 1 and {MAX_HORIZON_YEARS} years"),
        ));
    }
    for b in &input.benefits {
        b.validate()?;
        if b.start_year > input.horizon_years {
            warnings.push(format!(
                "Benefit {} starts in year {} beyond the {}-year horizon",
                b.id, b.start_year, input.horizon_years
            ));
        }
    }
    for c in &input.costs {
        c.validate()?;
        if c.year > input.horizon_years {
            warnings.push(format!(
                "Cost {} falls in year {} beyond the {}-year horizon",
                c.id, c.year, input.horizon_years
            ));
        }
    }
    Ok(())
}
