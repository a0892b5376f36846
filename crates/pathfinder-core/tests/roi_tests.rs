use pathfinder_core::risk_roi::{
    calculate_risk_adjusted_roi, ComparatorScaling, RiskProfile, RiskProfileTable, RiskRoiInput,
    WeightedItem,
};
use pathfinder_core::PathfinderError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn item(name: &str, value: Decimal, confidence: Decimal) -> WeightedItem {
    WeightedItem {
        name: name.into(),
        value,
        confidence,
    }
}

#[test]
fn test_moderate_profile_reference_case() {
    let input = RiskRoiInput {
        benefits: vec![item("benefits", dec!(1000000), dec!(0.9))],
        costs: vec![item("costs", dec!(500000), dec!(0.95))],
        risk_profile: RiskProfile::Moderate,
        comparators: vec![],
        profile_table: None,
    };
    let out = calculate_risk_adjusted_roi(&input).unwrap().result;

    assert_eq!(out.raw_benefits, dec!(900000));
    assert_eq!(out.raw_costs, dec!(475000));
    assert_eq!(out.adjusted_benefits, dec!(765000));
    assert_eq!(out.adjusted_costs, dec!(522500));
    assert_eq!(out.net_benefit, dec!(242500));
    assert_eq!(out.roi.round_dp(1), dec!(46.4));
}

#[test]
fn test_every_builtin_profile_never_improves_the_picture() {
    let table = RiskProfileTable::default();
    for profile in RiskProfile::ALL {
        let adj = table.get(profile);
        assert!(adj.benefits_multiplier <= Decimal::ONE, "{profile}");
        assert!(adj.costs_multiplier >= Decimal::ONE, "{profile}");
    }
}

#[test]
fn test_comparators_warn_when_ahead() {
    let input = RiskRoiInput {
        benefits: vec![item("benefits", dec!(1000), dec!(1))],
        costs: vec![item("costs", dec!(500), dec!(1))],
        risk_profile: RiskProfile::Low,
        comparators: vec![
            ComparatorScaling {
                name: "lean".into(),
                benefit_fraction: dec!(1.0),
                cost_fraction: dec!(0.5),
            },
            ComparatorScaling {
                name: "heavy".into(),
                benefit_fraction: dec!(0.9),
                cost_fraction: dec!(1.3),
            },
        ],
        profile_table: None,
    };
    let out = calculate_risk_adjusted_roi(&input).unwrap();
    assert_eq!(out.result.comparators.len(), 2);
    assert!(out.result.comparators[0].roi > out.result.roi);
    assert!(out.result.comparators[1].roi < out.result.roi);
    assert_eq!(out.warnings.len(), 1);
    assert!(out.warnings[0].contains("lean"));
}

#[test]
fn test_comparator_with_zero_cost_fraction_errors() {
    let input = RiskRoiInput {
        benefits: vec![item("benefits", dec!(1000), dec!(1))],
        costs: vec![item("costs", dec!(500), dec!(1))],
        risk_profile: RiskProfile::High,
        comparators: vec![ComparatorScaling {
            name: "free".into(),
            benefit_fraction: dec!(1),
            cost_fraction: Decimal::ZERO,
        }],
        profile_table: None,
    };
    assert!(matches!(
        calculate_risk_adjusted_roi(&input),
        Err(PathfinderError::DivisionByZero { .. })
    ));
}

#[test]
fn test_json_input_with_profile_name() {
    let json = r#"{
        "benefits": [{"name": "uptime", "value": 250000, "confidence": 0.8}],
        "costs": [{"name": "run", "value": 100000, "confidence": 1}],
        "risk_profile": "high"
    }"#;
    let input: RiskRoiInput = serde_json::from_str(json).unwrap();
    let out = calculate_risk_adjusted_roi(&input).unwrap().result;
    // 200000×0.70 = 140000; 100000×1.25 = 125000 → 12%
    assert_eq!(out.roi, dec!(12));
}

proptest! {
    /// Moving from low to moderate to high never raises ROI.
    #[test]
    fn prop_severity_never_increases_roi(
        benefit in 0u64..10_000_000,
        benefit_conf in 0u32..=100,
        cost in 1u64..10_000_000,
        cost_conf in 1u32..=100,
    ) {
        let roi_for = |profile: RiskProfile| {
            let input = RiskRoiInput {
                benefits: vec![item("b", Decimal::from(benefit), Decimal::from(benefit_conf) / dec!(100))],
                costs: vec![item("c", Decimal::from(cost), Decimal::from(cost_conf) / dec!(100))],
                risk_profile: profile,
                comparators: vec![],
                profile_table: None,
            };
            calculate_risk_adjusted_roi(&input).unwrap().result.roi
        };
        let low = roi_for(RiskProfile::Low);
        let moderate = roi_for(RiskProfile::Moderate);
        let high = roi_for(RiskProfile::High);
        prop_assert!(moderate <= low);
        prop_assert!(high <= moderate);
    }
}
