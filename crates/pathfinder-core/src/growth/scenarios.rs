use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PathfinderError;
use crate::types::{Money, Percent};
use crate::validation::{parse_decimal, require_percent};
use crate::PathfinderResult;

/// A named what-if scenario. Rates are on the 0–100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthScenario {
    pub name: String,
    pub description: String,
    pub baseline_revenue: Money,
    /// Current market share, percent
    pub baseline_market_share: Percent,
    /// Organic growth rate, percent per year
    pub baseline_growth_rate: Percent,
    /// Maximum extra growth the initiative can add, percent per year
    pub growth_boost: Percent,
    /// Growth rate of the overall market, percent per year
    pub market_growth_rate: Percent,
}

/// Immutable catalog of scenarios, selected by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioCatalog {
    pub scenarios: Vec<GrowthScenario>,
}

impl ScenarioCatalog {
    pub fn builtin() -> Self {
        let s = |name: &str,
                 description: &str,
                 revenue: Decimal,
                 share: Decimal,
                 growth: Decimal,
                 boost: Decimal,
                 market: Decimal| GrowthScenario {
            name: name.to_string(),
            description: description.to_string(),
            baseline_revenue: revenue,
            baseline_market_share: share,
            baseline_growth_rate: growth,
            growth_boost: boost,
            market_growth_rate: market,
        };
        Self {
            scenarios: vec![
                s(
                    "digital_transformation",
                    "Modernise core platforms and move customer journeys online",
                    dec!(250000000),
                    dec!(12),
                    dec!(4),
                    dec!(8),
                    dec!(5),
                ),
                s(
                    "cloud_migration",
                    "Migrate legacy estate to hybrid cloud and retire data centres",
                    dec!(180000000),
                    dec!(9),
                    dec!(3.5),
                    dec!(6),
                    dec!(4.5),
                ),
                s(
                    "ai_enablement",
                    "Embed analytics and AI into sales and service operations",
                    dec!(320000000),
                    dec!(15),
                    dec!(5),
                    dec!(10),
                    dec!(6),
                ),
                s(
                    "status_quo",
                    "Continue current operating model with no new investment",
                    dec!(250000000),
                    dec!(12),
                    dec!(4),
                    Decimal::ZERO,
                    dec!(5),
                ),
            ],
        }
    }

    pub fn scenario(&self, name: &str) -> PathfinderResult<&GrowthScenario> {
        self.scenarios
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| PathfinderError::InvalidInput {
                field: "scenario".into(),
                reason: format!(
                    "Unknown scenario '{name}' (available: {})",
                    self.names().join(", ")
                ),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name.as_str()).collect()
    }
}

/// The three what-if sliders, each 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderSettings {
    pub investment_level: Percent,
    pub execution_speed: Percent,
    pub competitive_pressure: Percent,
}

impl Default for SliderSettings {
    fn default() -> Self {
        Self {
            investment_level: dec!(50),
            execution_speed: dec!(50),
            competitive_pressure: dec!(50),
        }
    }
}

impl SliderSettings {
    pub fn validate(&self) -> PathfinderResult<()> {
        require_percent("investment_level", self.investment_level)?;
        require_percent("execution_speed", self.execution_speed)?;
        require_percent("competitive_pressure", self.competitive_pressure)?;
        Ok(())
    }

    /// Parse widget query parameters such as
    /// `investment=70&speed=60&pressure=30`.
    ///
    /// Long names (`investment_level`, `execution_speed`,
    /// `competitive_pressure`) are accepted too; missing keys keep their
    /// defaults and unknown keys are ignored.
    pub fn from_query(query: &str) -> PathfinderResult<Self> {
        let mut settings = Self::default();
        let query = query.trim_start_matches('?');
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "investment" | "investment_level" => {
                    settings.investment_level = parse_decimal("investment_level", raw)?
                }
                "speed" | "execution_speed" => {
                    settings.execution_speed = parse_decimal("execution_speed", raw)?
                }
                "pressure" | "competitive_pressure" => {
                    settings.competitive_pressure = parse_decimal("competitive_pressure", raw)?
                }
                _ => {}
            }
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = ScenarioCatalog::builtin();
        assert!(catalog.scenario("Cloud_Migration").is_ok());
    }

    #[test]
    fn test_unknown_scenario_lists_names() {
        let catalog = ScenarioCatalog::builtin();
        match catalog.scenario("moonshot") {
            Err(PathfinderError::InvalidInput { reason, .. }) => {
                assert!(reason.contains("digital_transformation"))
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_query_parsing() {
        let s = SliderSettings::from_query("?investment=70&speed=60&pressure=30&utm=x").unwrap();
        assert_eq!(s.investment_level, dec!(70));
        assert_eq!(s.execution_speed, dec!(60));
        assert_eq!(s.competitive_pressure, dec!(30));
    }

    #[test]
    fn test_query_defaults() {
        assert_eq!(SliderSettings::from_query("").unwrap(), SliderSettings::default());
    }

    #[test]
    fn test_query_rejects_non_numeric() {
        assert!(SliderSettings::from_query("investment=lots").is_err());
        assert!(SliderSettings::from_query("speed=").is_err());
    }

    #[test]
    fn test_query_rejects_out_of_range() {
        assert!(SliderSettings::from_query("pressure=120").is_err());
    }
}
