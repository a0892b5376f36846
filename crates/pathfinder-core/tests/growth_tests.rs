use pathfinder_core::growth::{
    project_growth, GrowthInput, GrowthScenario, ScenarioCatalog, SliderSettings,
};
use pathfinder_core::PathfinderError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn scenario(boost: Decimal) -> GrowthScenario {
    GrowthScenario {
        name: "what-if".into(),
        description: "test scenario".into(),
        baseline_revenue: dec!(250000000),
        baseline_market_share: dec!(12),
        baseline_growth_rate: dec!(4),
        growth_boost: boost,
        market_growth_rate: dec!(5),
    }
}

#[test]
fn test_catalog_scenario_with_query_sliders() {
    let catalog = ScenarioCatalog::builtin();
    let input = GrowthInput {
        scenario: catalog.scenario("digital_transformation").unwrap().clone(),
        sliders: SliderSettings::from_query("investment=100&speed=50&pressure=50").unwrap(),
        horizon_years: 5,
    };
    let out = project_growth(&input).unwrap().result;
    // 8 × 1 × 0.5 × 0.5 = 2
    assert_eq!(out.adjusted_boost, dec!(2));
    assert_eq!(out.target_growth_rate, dec!(6));
    assert_eq!(out.rows.len(), 6);
    // share drift (6 − 5)/10 = 0.1 per year
    assert_eq!(out.final_market_share, dec!(12.5));
    assert!(out.additional_revenue > Decimal::ZERO);
}

#[test]
fn test_status_quo_matches_baseline() {
    let catalog = ScenarioCatalog::builtin();
    let input = GrowthInput {
        scenario: catalog.scenario("status_quo").unwrap().clone(),
        sliders: SliderSettings::default(),
        horizon_years: 10,
    };
    let out = project_growth(&input).unwrap().result;
    assert_eq!(out.additional_revenue, Decimal::ZERO);
}

#[test]
fn test_runaway_baseline_growth_rejected() {
    let mut s = scenario(dec!(10));
    s.baseline_revenue = dec!(1000000000000);
    s.baseline_growth_rate = dec!(1000);
    let input = GrowthInput {
        scenario: s,
        sliders: SliderSettings::default(),
        horizon_years: 30,
    };
    assert!(matches!(
        project_growth(&input),
        Err(PathfinderError::InvalidInput { .. })
    ));
}

proptest! {
    /// With no investment, no execution speed or no boost constant, the
    /// projected trajectory is the baseline trajectory in every year.
    #[test]
    fn prop_zero_boost_matches_baseline(
        boost in 0u32..=20,
        level in 0u32..=100,
        pressure in 0u32..=100,
        which in 0usize..3,
        horizon in 1u32..=10,
    ) {
        let (boost, investment, speed) = match which {
            0 => (Decimal::from(boost), Decimal::ZERO, Decimal::from(level)),
            1 => (Decimal::from(boost), Decimal::from(level), Decimal::ZERO),
            _ => (Decimal::ZERO, Decimal::from(level), Decimal::from(level)),
        };
        let input = GrowthInput {
            scenario: scenario(boost),
            sliders: SliderSettings {
                investment_level: investment,
                execution_speed: speed,
                competitive_pressure: Decimal::from(pressure),
            },
            horizon_years: horizon,
        };
        let out = project_growth(&input).unwrap().result;
        for row in &out.rows {
            prop_assert_eq!(row.projected_revenue, row.baseline_revenue);
            prop_assert_eq!(row.market_share, row.baseline_market_share);
        }
    }
}
