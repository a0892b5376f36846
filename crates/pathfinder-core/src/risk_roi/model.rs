use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PathfinderError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::validation::{
    div, mul, require_amount, require_fraction, require_non_negative, sub, sum,
};
use crate::PathfinderResult;

use super::profiles::{RiskAdjustment, RiskProfile, RiskProfileTable};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A benefit or cost line with a confidence weight in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedItem {
    pub name: String,
    pub value: Money,
    pub confidence: Rate,
}

/// A competitor modelled as fractions of the subject's adjusted figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparatorScaling {
    pub name: String,
    pub benefit_fraction: Rate,
    pub cost_fraction: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskRoiInput {
    pub benefits: Vec<WeightedItem>,
    pub costs: Vec<WeightedItem>,
    pub risk_profile: RiskProfile,
    #[serde(default)]
    pub comparators: Vec<ComparatorScaling>,
    /// Replaces the built-in multipliers when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_table: Option<RiskProfileTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparatorRoi {
    pub name: String,
    pub benefits: Money,
    pub costs: Money,
    pub roi: Percent,
}

/// ROI under one profile, holding line items fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRoi {
    pub profile: RiskProfile,
    pub adjusted_benefits: Money,
    pub adjusted_costs: Money,
    pub roi: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskRoiOutput {
    pub risk_profile: RiskProfile,
    pub adjustment: RiskAdjustment,
    pub raw_benefits: Money,
    pub raw_costs: Money,
    pub adjusted_benefits: Money,
    pub adjusted_costs: Money,
    pub net_benefit: Money,
    pub roi: Percent,
    pub comparators: Vec<ComparatorRoi>,
    pub profile_sensitivity: Vec<ProfileRoi>,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Confidence-weighted, risk-adjusted ROI for the subject and comparators.
///
/// raw = Σ value × confidence; adjusted = raw × profile multiplier;
/// ROI = (benefits − costs) / costs × 100. Zero adjusted cost is an error.
pub fn calculate_risk_adjusted_roi(
    input: &RiskRoiInput,
) -> PathfinderResult<ComputationOutput<RiskRoiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    tracing::debug!(
        profile = %input.risk_profile,
        benefits = input.benefits.len(),
        costs = input.costs.len(),
        comparators = input.comparators.len(),
        "calculating risk-adjusted ROI"
    );

    let table = match &input.profile_table {
        Some(custom) => {
            custom.validate()?;
            custom.clone()
        }
        None => RiskProfileTable::default(),
    };
    validate_roi_input(input)?;

    let raw_benefits = confidence_weighted_total(&input.benefits)?;
    let raw_costs = confidence_weighted_total(&input.costs)?;

    let adjustment = table.get(input.risk_profile);
    let adjusted_benefits = mul(
        "adjusted_benefits",
        raw_benefits,
        adjustment.benefits_multiplier,
    )?;
    let adjusted_costs = mul("adjusted_costs", raw_costs, adjustment.costs_multiplier)?;
    let roi = roi_pct(adjusted_benefits, adjusted_costs, "subject ROI")?;

    let comparators = input
        .comparators
        .iter()
        .map(|c| {
            let benefits = mul(&c.name, adjusted_benefits, c.benefit_fraction)?;
            let costs = mul(&c.name, adjusted_costs, c.cost_fraction)?;
            Ok(ComparatorRoi {
                name: c.name.clone(),
                benefits,
                costs,
                roi: roi_pct(benefits, costs, &format!("{} ROI", c.name))?,
            })
        })
        .collect::<PathfinderResult<Vec<_>>>()?;

    if let Some(best) = comparators.iter().filter(|c| c.roi > roi).max_by_key(|c| c.roi) {
        warnings.push(format!(
            "Comparator '{}' shows higher ROI ({}%) than the subject",
            best.name,
            best.roi.round_dp(1)
        ));
    }

    let profile_sensitivity = RiskProfile::ALL
        .iter()
        .map(|&profile| {
            let adj = table.get(profile);
            let context = format!("{profile} profile ROI");
            let b = mul(&context, raw_benefits, adj.benefits_multiplier)?;
            let c = mul(&context, raw_costs, adj.costs_multiplier)?;
            Ok(ProfileRoi {
                profile,
                adjusted_benefits: b,
                adjusted_costs: c,
                roi: roi_pct(b, c, &context)?,
            })
        })
        .collect::<PathfinderResult<Vec<_>>>()?;

    let output = RiskRoiOutput {
        risk_profile: input.risk_profile,
        adjustment,
        raw_benefits,
        raw_costs,
        adjusted_benefits,
        adjusted_costs,
        net_benefit: sub("net_benefit", adjusted_benefits, adjusted_costs)?,
        roi,
        comparators,
        profile_sensitivity,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Confidence-weighted ROI with risk-profile multipliers",
        &serde_json::json!({
            "risk_profile": input.risk_profile.to_string(),
            "benefits_multiplier": adjustment.benefits_multiplier.to_string(),
            "costs_multiplier": adjustment.costs_multiplier.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Σ value × confidence
pub fn confidence_weighted_total(items: &[WeightedItem]) -> PathfinderResult<Money> {
    let weighted = items
        .iter()
        .map(|i| mul(&i.name, i.value, i.confidence))
        .collect::<PathfinderResult<Vec<_>>>()?;
    sum("confidence_weighted_total", weighted)
}

/// (benefits − costs) / costs × 100
pub fn roi_pct(benefits: Money, costs: Money, context: &str) -> PathfinderResult<Percent> {
    if costs.is_zero() {
        return Err(PathfinderError::DivisionByZero {
            context: format!("{context} (adjusted cost is zero)"),
        });
    }
    let net = sub(context, benefits, costs)?;
    mul(context, div(context, net, costs)?, dec!(100))
}

fn validate_roi_input(input: &RiskRoiInput) -> PathfinderResult<()> {
    if input.costs.is_empty() {
        return Err(PathfinderError::InsufficientData(
            "ROI requires at least one cost item".into(),
        ));
    }
    for (side, items) in [("benefits", &input.benefits), ("costs", &input.costs)] {
        for (idx, item) in items.iter().enumerate() {
            require_amount(&format!("{side}[{idx}].value"), item.value)?;
            require_fraction(&format!("{side}[{idx}].confidence"), item.confidence)?;
        }
    }
    for c in &input.comparators {
        require_non_negative(&format!("{}.benefit_fraction", c.name), c.benefit_fraction)?;
        require_non_negative(&format!("{}.cost_fraction", c.name), c.cost_fraction)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn item(name: &str, value: Money, confidence: Rate) -> WeightedItem {
        WeightedItem {
            name: name.into(),
            value,
            confidence,
        }
    }

    fn base_input(profile: RiskProfile) -> RiskRoiInput {
        RiskRoiInput {
            benefits: vec![item("efficiency", dec!(1000000), dec!(0.9))],
            costs: vec![item("programme", dec!(500000), dec!(0.95))],
            risk_profile: profile,
            comparators: vec![],
            profile_table: None,
        }
    }

    #[test]
    fn test_weighted_totals() {
        let items = vec![item("a", dec!(100), dec!(0.5)), item("b", dec!(200), dec!(1))];
        assert_eq!(confidence_weighted_total(&items).unwrap(), dec!(250));
    }

    #[test]
    fn test_item_value_ceiling() {
        let mut input = base_input(RiskProfile::Low);
        input.benefits = vec![item("windfall", Decimal::MAX, Decimal::ONE)];
        match calculate_risk_adjusted_roi(&input) {
            Err(PathfinderError::InvalidInput { field, .. }) => {
                assert_eq!(field, "benefits[0].value")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_vanishing_cost_overflows_roi() {
        let mut input = base_input(RiskProfile::Low);
        input.costs = vec![item("token", dec!(0.0000000000000000000000001), Decimal::ONE)];
        assert!(matches!(
            calculate_risk_adjusted_roi(&input),
            Err(PathfinderError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_zero_cost_is_division_error() {
        let mut input = base_input(RiskProfile::Low);
        input.costs = vec![item("free", dec!(100), Decimal::ZERO)];
        assert!(matches!(
            calculate_risk_adjusted_roi(&input),
            Err(PathfinderError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_no_costs_rejected() {
        let mut input = base_input(RiskProfile::Low);
        input.costs.clear();
        assert!(matches!(
            calculate_risk_adjusted_roi(&input),
            Err(PathfinderError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        let mut input = base_input(RiskProfile::Low);
        input.benefits[0].confidence = dec!(1.2);
        assert!(matches!(
            calculate_risk_adjusted_roi(&input),
            Err(PathfinderError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_invalid_custom_table_rejected() {
        let mut input = base_input(RiskProfile::Low);
        let mut table = RiskProfileTable::default();
        table.moderate.costs_multiplier = dec!(0.8);
        input.profile_table = Some(table);
        assert!(matches!(
            calculate_risk_adjusted_roi(&input),
            Err(PathfinderError::RegistryError(_))
        ));
    }

    #[test]
    fn test_comparator_scaling() {
        let mut input = base_input(RiskProfile::Moderate);
        input.comparators = vec![ComparatorScaling {
            name: "competitor".into(),
            benefit_fraction: dec!(0.8),
            cost_fraction: dec!(1.2),
        }];
        let out = calculate_risk_adjusted_roi(&input).unwrap().result;
        let comp = &out.comparators[0];
        assert_eq!(comp.benefits, dec!(612000));
        assert_eq!(comp.costs, dec!(627000));
        assert!(comp.roi < Decimal::ZERO);
    }

    #[test]
    fn test_sensitivity_covers_all_profiles_in_order() {
        let out = calculate_risk_adjusted_roi(&base_input(RiskProfile::Low))
            .unwrap()
            .result;
        let profiles: Vec<RiskProfile> = out.profile_sensitivity.iter().map(|p| p.profile).collect();
        assert_eq!(profiles, RiskProfile::ALL.to_vec());
    }
}
