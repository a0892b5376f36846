use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PathfinderError;
use crate::types::Rate;
use crate::PathfinderResult;

/// Named estimation-risk levels, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    Low,
    Moderate,
    High,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 3] = [RiskProfile::Low, RiskProfile::Moderate, RiskProfile::High];
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskProfile::Low => "low",
            RiskProfile::Moderate => "moderate",
            RiskProfile::High => "high",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for RiskProfile {
    type Err = PathfinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskProfile::Low),
            "moderate" | "medium" => Ok(RiskProfile::Moderate),
            "high" => Ok(RiskProfile::High),
            other => Err(PathfinderError::InvalidInput {
                field: "risk_profile".into(),
                reason: format!("Unknown risk profile '{other}' (expected low, moderate or high)"),
            }),
        }
    }
}

/// Multiplier pair: risk discounts benefits and inflates costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAdjustment {
    /// Applied to confidence-weighted benefits; must be in (0, 1]
    pub benefits_multiplier: Rate,
    /// Applied to confidence-weighted costs; must be ≥ 1
    pub costs_multiplier: Rate,
}

/// Multipliers for each risk profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfileTable {
    pub low: RiskAdjustment,
    pub moderate: RiskAdjustment,
    pub high: RiskAdjustment,
}

impl Default for RiskProfileTable {
    fn default() -> Self {
        Self {
            low: RiskAdjustment {
                benefits_multiplier: dec!(0.95),
                costs_multiplier: dec!(1.05),
            },
            moderate: RiskAdjustment {
                benefits_multiplier: dec!(0.85),
                costs_multiplier: dec!(1.10),
            },
            high: RiskAdjustment {
                benefits_multiplier: dec!(0.70),
                costs_multiplier: dec!(1.25),
            },
        }
    }
}

impl RiskProfileTable {
    pub fn get(&self, profile: RiskProfile) -> RiskAdjustment {
        match profile {
            RiskProfile::Low => self.low,
            RiskProfile::Moderate => self.moderate,
            RiskProfile::High => self.high,
        }
    }

    /// Enforce that risk never improves the picture: every benefits
    /// multiplier is in (0, 1], every costs multiplier is ≥ 1, and a more
    /// severe profile is never more generous than a milder one.
    pub fn validate(&self) -> PathfinderResult<()> {
        for profile in RiskProfile::ALL {
            let adj = self.get(profile);
            if adj.benefits_multiplier <= Decimal::ZERO || adj.benefits_multiplier > Decimal::ONE {
                return Err(PathfinderError::RegistryError(format!(
                    "{profile} benefits_multiplier {} must be in (0, 1]",
                    adj.benefits_multiplier
                )));
            }
            if adj.costs_multiplier < Decimal::ONE {
                return Err(PathfinderError::RegistryError(format!(
                    "{profile} costs_multiplier {} must be at least 1",
                    adj.costs_multiplier
                )));
            }
        }
        for pair in RiskProfile::ALL.windows(2) {
            let (milder, severer) = (self.get(pair[0]), self.get(pair[1]));
            if severer.benefits_multiplier > milder.benefits_multiplier
                || severer.costs_multiplier < milder.costs_multiplier
            {
                return Err(PathfinderError::RegistryError(format!(
                    "{} profile is more generous than {}",
                    pair[1], pair[0]
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        assert!(RiskProfileTable::default().validate().is_ok());
    }

    #[test]
    fn test_benefit_multiplier_above_one_rejected() {
        let mut table = RiskProfileTable::default();
        table.low.benefits_multiplier = dec!(1.05);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_cost_multiplier_below_one_rejected() {
        let mut table = RiskProfileTable::default();
        table.high.costs_multiplier = dec!(0.9);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_inverted_severity_rejected() {
        let mut table = RiskProfileTable::default();
        table.high.benefits_multiplier = dec!(0.99);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_parse_profile_names() {
        assert_eq!("Moderate".parse::<RiskProfile>().unwrap(), RiskProfile::Moderate);
        assert_eq!("medium".parse::<RiskProfile>().unwrap(), RiskProfile::Moderate);
        assert!("extreme".parse::<RiskProfile>().is_err());
    }
}
