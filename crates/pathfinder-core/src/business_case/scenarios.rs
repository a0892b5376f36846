use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PathfinderError;
use crate::types::{Money, Percent, Rate};
use crate::PathfinderResult;

use super::engine::FinancialMetrics;

/// Upper bound on a scenario's multiplier on the baseline.
const MAX_SCENARIO_MULTIPLIER: Decimal = dec!(10);

/// Fixed scenario definition: multiplier on baseline NPV/ROI, payback and
/// probability are lookup constants, not derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseScenario {
    pub name: String,
    pub multiplier: Decimal,
    pub payback_years: Decimal,
    pub probability: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRow {
    pub name: String,
    pub npv: Money,
    pub roi: Percent,
    pub payback_years: Decimal,
    pub probability: Rate,
    pub deviation_from_expected: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioTable {
    pub rows: Vec<ScenarioRow>,
    pub probability_weighted_npv: Money,
    pub probability_weighted_roi: Percent,
}

/// Best / expected / delayed / worst case.
pub fn default_case_scenarios() -> Vec<CaseScenario> {
    [
        ("Best Case", dec!(1.25), dec!(1.5), dec!(0.20)),
        ("Expected Case", dec!(1.0), dec!(2.1), dec!(0.50)),
        ("Delayed Implementation", dec!(0.8), dec!(2.8), dec!(0.20)),
        ("Worst Case", dec!(0.5), dec!(3.5), dec!(0.10)),
    ]
    .into_iter()
    .map(|(name, multiplier, payback_years, probability)| CaseScenario {
        name: name.to_string(),
        multiplier,
        payback_years,
        probability,
    })
    .collect()
}

/// Scale baseline NPV and ROI by each scenario's multiplier and weight
/// them by probability.
pub fn build_scenario_table(
    baseline: &FinancialMetrics,
    scenarios: &[CaseScenario],
) -> PathfinderResult<ScenarioTable> {
    if scenarios.is_empty() {
        return Err(PathfinderError::InsufficientData(
            "At least one scenario required".into(),
        ));
    }

    for s in scenarios {
        if s.probability < Decimal::ZERO || s.probability > Decimal::ONE {
            return Err(PathfinderError::InvalidInput {
                field: format!("scenario:{} probability", s.name),
                reason: "Probability must be between 0 and 1".into(),
            });
        }
        if s.multiplier < Decimal::ZERO || s.multiplier > MAX_SCENARIO_MULTIPLIER {
            return Err(PathfinderError::InvalidInput {
                field: format!("scenario:{} multiplier", s.name),
                reason: format!("Multiplier must be between 0 and {MAX_SCENARIO_MULTIPLIER}"),
            });
        }
    }

    let total_prob: Decimal = scenarios.iter().map(|s| s.probability).sum();
    if (total_prob - Decimal::ONE).abs() > dec!(0.001) {
        return Err(PathfinderError::InvalidInput {
            field: "probabilities".into(),
            reason: format!("Probabilities must sum to 1.0 (got {total_prob})"),
        });
    }

    let mut rows = Vec::with_capacity(scenarios.len());
    let mut probability_weighted_npv = Decimal::ZERO;
    let mut probability_weighted_roi = Decimal::ZERO;

    for s in scenarios {
        let npv = baseline.npv * s.multiplier;
        let roi = baseline.roi * s.multiplier;
        probability_weighted_npv += s.probability * npv;
        probability_weighted_roi += s.probability * roi;
        rows.push(ScenarioRow {
            name: s.name.clone(),
            npv,
            roi,
            payback_years: s.payback_years,
            probability: s.probability,
            deviation_from_expected: npv - baseline.npv,
        });
    }

    Ok(ScenarioTable {
        rows,
        probability_weighted_npv,
        probability_weighted_roi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> FinancialMetrics {
        FinancialMetrics {
            npv: dec!(2400000),
            roi: dec!(185),
            irr: dec!(42),
            payback_period: dec!(2.1),
            benefit_cost_ratio: dec!(2.85),
        }
    }

    #[test]
    fn test_default_probabilities_sum_to_one() {
        let total: Decimal = default_case_scenarios().iter().map(|s| s.probability).sum();
        assert_eq!(total, Decimal::ONE);
    }

    #[test]
    fn test_multipliers_applied() {
        let table = build_scenario_table(&baseline(), &default_case_scenarios()).unwrap();
        let npvs: Vec<Money> = table.rows.iter().map(|r| r.npv).collect();
        assert_eq!(
            npvs,
            vec![dec!(3000000), dec!(2400000), dec!(1920000), dec!(1200000)]
        );
        assert_eq!(table.rows[3].roi, dec!(92.5));
        assert_eq!(table.rows[0].deviation_from_expected, dec!(600000));
    }

    #[test]
    fn test_probability_weighted_npv() {
        let table = build_scenario_table(&baseline(), &default_case_scenarios()).unwrap();
        // 0.2×3.0M + 0.5×2.4M + 0.2×1.92M + 0.1×1.2M = 2.304M
        assert_eq!(table.probability_weighted_npv, dec!(2304000));
    }

    #[test]
    fn test_multiplier_ceiling() {
        let mut scenarios = default_case_scenarios();
        scenarios[0].multiplier = dec!(100000000000000000000);
        assert!(build_scenario_table(&baseline(), &scenarios).is_err());
    }

    #[test]
    fn test_bad_probabilities_rejected() {
        let mut scenarios = default_case_scenarios();
        scenarios[0].probability = dec!(0.5);
        assert!(build_scenario_table(&baseline(), &scenarios).is_err());
    }
}
