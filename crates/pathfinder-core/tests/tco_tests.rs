use pathfinder_core::tco::{
    compare_tco, tco_input_from_registry, CostStructure, CostStructureRegistry, OfferingInput,
    TcoInput, TcoPosition,
};
use pathfinder_core::PathfinderError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn structure() -> CostStructure {
    CostStructure {
        implementation: dec!(0.25),
        licensing: dec!(0.20),
        support: dec!(0.15),
        maintenance: dec!(0.12),
        training: dec!(0.08),
        security: dec!(0.10),
    }
}

fn offering(name: &str, inv: Decimal, decay: Vec<Decimal>) -> OfferingInput {
    OfferingInput {
        name: name.into(),
        initial_investment: inv,
        cost_structure: structure(),
        decay_factors: decay,
    }
}

// ===========================================================================
// Concrete scenario
// ===========================================================================

#[test]
fn test_three_year_premium_scenario() {
    let input = TcoInput {
        subject: offering("DXC", dec!(1000000), vec![dec!(1.0), dec!(0.65), dec!(0.60)]),
        comparator: offering("Competitor", dec!(850000), vec![dec!(1.0), dec!(0.70), dec!(0.75)]),
        years: 3,
    };
    let out = compare_tco(&input).unwrap().result;

    assert_eq!(out.subject_total_cost, dec!(2250000));
    assert_eq!(out.comparator_total_cost, dec!(2082500));
    assert_eq!(out.savings, dec!(-167500));
    assert_eq!(out.headline, "Premium");

    match out.position {
        TcoPosition::Premium { amount, percentage } => {
            assert_eq!(amount, dec!(167500));
            assert_eq!(percentage.round_dp(2), dec!(8.04));
        }
        other => panic!("expected premium, got {other:?}"),
    }
}

#[test]
fn test_registry_comparison_five_years() {
    let registry = CostStructureRegistry::builtin().unwrap();
    let input = tco_input_from_registry(
        &registry,
        "healthcare",
        "ibm",
        dec!(1200000),
        dec!(1200000),
        5,
    )
    .unwrap();
    let out = compare_tco(&input).unwrap().result;
    assert_eq!(out.subject_breakdown.len(), 5);
    // Subject decays faster than every built-in competitor at equal spend
    assert!(matches!(out.position, TcoPosition::Savings { .. }));
}

#[test]
fn test_registry_horizon_beyond_data_is_rejected() {
    let registry = CostStructureRegistry::builtin().unwrap();
    let input = tco_input_from_registry(
        &registry,
        "manufacturing",
        "accenture",
        dec!(1000000),
        dec!(900000),
        6,
    )
    .unwrap();
    assert!(compare_tco(&input).is_err());
}

#[test]
fn test_input_from_json_document() {
    let json = r#"{
        "subject": {
            "name": "DXC",
            "initial_investment": "500000",
            "cost_structure": {"implementation": 0.2, "licensing": 0.2, "support": 0.1,
                               "maintenance": 0.1, "training": 0.1, "security": 0.1},
            "decay_factors": [1.0, 0.6]
        },
        "comparator": {
            "name": "Other",
            "initial_investment": 500000,
            "cost_structure": {"implementation": 0.2, "licensing": 0.2, "support": 0.1,
                               "maintenance": 0.1, "training": 0.1, "security": 0.1},
            "decay_factors": [1.0, 0.8]
        },
        "years": 2
    }"#;
    let input: TcoInput = serde_json::from_str(json).unwrap();
    let out = compare_tco(&input).unwrap().result;
    assert_eq!(out.savings, dec!(100000));
}

#[test]
fn test_investment_near_decimal_limit_rejected() {
    let ones = vec![Decimal::ONE; 5];
    let input = TcoInput {
        subject: offering("DXC", dec!(30000000000000000000000000000), ones.clone()),
        comparator: offering("Competitor", dec!(1000000), ones),
        years: 5,
    };
    match compare_tco(&input) {
        Err(PathfinderError::InvalidInput { field, .. }) => {
            assert_eq!(field, "subject.initial_investment")
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

// ===========================================================================
// Properties
// ===========================================================================

fn decay_strategy() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(1u32..=150, 1..=5).prop_map(|v| {
        v.into_iter()
            .map(|pct| Decimal::from(pct) / Decimal::from(100))
            .collect()
    })
}

proptest! {
    /// Raising the initial investment raises every year's cost when decay
    /// factors are positive.
    #[test]
    fn prop_cost_monotonic_in_investment(
        decay in decay_strategy(),
        base in 1u64..10_000_000,
        extra in 1u64..1_000_000,
    ) {
        let years = decay.len() as u32;
        let low = offering("A", Decimal::from(base), decay.clone());
        let high = offering("A", Decimal::from(base + extra), decay.clone());
        let cmp = offering("B", Decimal::from(1_000_000u64), decay);

        let lo = compare_tco(&TcoInput { subject: low, comparator: cmp.clone(), years }).unwrap();
        let hi = compare_tco(&TcoInput { subject: high, comparator: cmp, years }).unwrap();

        for (a, b) in lo.result.subject_breakdown.iter().zip(hi.result.subject_breakdown.iter()) {
            prop_assert!(b.total_cost > a.total_cost);
        }
    }

    /// savings > 0 exactly when the subject is cheaper, and the reported
    /// branch follows the sign.
    #[test]
    fn prop_savings_sign_consistent(
        inv_a in 1u64..5_000_000,
        inv_b in 1u64..5_000_000,
        decay_a in decay_strategy(),
        decay_b in decay_strategy(),
    ) {
        let years = decay_a.len().min(decay_b.len()) as u32;
        let input = TcoInput {
            subject: offering("A", Decimal::from(inv_a), decay_a),
            comparator: offering("B", Decimal::from(inv_b), decay_b),
            years,
        };
        let out = compare_tco(&input).unwrap().result;

        prop_assert_eq!(
            out.savings > Decimal::ZERO,
            out.subject_total_cost < out.comparator_total_cost
        );
        match out.position {
            TcoPosition::Savings { amount, .. } => {
                prop_assert!(out.savings > Decimal::ZERO);
                prop_assert_eq!(amount, out.savings);
            }
            TcoPosition::Premium { amount, .. } => {
                prop_assert!(out.savings < Decimal::ZERO);
                prop_assert_eq!(amount, -out.savings);
            }
            TcoPosition::Parity => prop_assert!(out.savings.is_zero()),
        }
    }
}
