use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PathfinderError;
use crate::types::{Money, Percent};
use crate::validation::{require_amount, require_percent};
use crate::PathfinderResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostType {
    OneTime,
    Recurring,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: u32,
    pub category: String,
    pub description: String,
    /// Full-run-rate value per year
    pub annual_value: Money,
    pub confidence_level: ConfidenceLevel,
    /// First year the benefit is realised
    pub start_year: u32,
    /// Percent of `annual_value` realised per year offset from `start_year`
    #[serde(default)]
    pub ramp_up: Vec<Percent>,
}

impl Benefit {
    /// Percent realised `offset` years after the start year. Offsets past
    /// the curve hold its last entry; an empty curve means full value.
    pub fn ramp_at(&self, offset: usize) -> Percent {
        self.ramp_up
            .get(offset)
            .or_else(|| self.ramp_up.last())
            .copied()
            .unwrap_or(Decimal::ONE_HUNDRED)
    }

    /// Value realised in `year`, zero before the start year.
    pub fn realized_in(&self, year: u32) -> Money {
        if year < self.start_year {
            return Decimal::ZERO;
        }
        let offset = (year - self.start_year) as usize;
        self.annual_value * self.ramp_at(offset) / Decimal::ONE_HUNDRED
    }

    pub(crate) fn validate(&self) -> PathfinderResult<()> {
        let prefix = format!("benefit[{}]", self.id);
        require_amount(&format!("{prefix}.annual_value"), self.annual_value)?;
        for (idx, pct) in self.ramp_up.iter().enumerate() {
            require_percent(&format!("{prefix}.ramp_up[{idx}]"), *pct)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    pub id: u32,
    pub category: String,
    pub description: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub cost_type: CostType,
    /// Year incurred; recurring costs repeat every year from here on
    pub year: u32,
}

impl Cost {
    pub fn incurred_in(&self, year: u32) -> Money {
        match self.cost_type {
            CostType::OneTime if year == self.year => self.amount,
            CostType::Recurring if year >= self.year => self.amount,
            _ => Decimal::ZERO,
        }
    }

    pub(crate) fn validate(&self) -> PathfinderResult<()> {
        require_amount(&format!("cost[{}].amount", self.id), self.amount)
    }
}

/// Fields supplied when adding a benefit; the id is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBenefit {
    pub category: String,
    pub description: String,
    pub annual_value: Money,
    pub confidence_level: ConfidenceLevel,
    pub start_year: u32,
    #[serde(default)]
    pub ramp_up: Vec<Percent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCost {
    pub category: String,
    pub description: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub cost_type: CostType,
    pub year: u32,
}

/// Editable set of benefits and costs.
///
/// Items are added and edited in place; there is no removal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessCase {
    pub benefits: Vec<Benefit>,
    pub costs: Vec<Cost>,
}

impl BusinessCase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_benefit(&mut self, new: NewBenefit) -> PathfinderResult<u32> {
        let id = self.benefits.iter().map(|b| b.id).max().map_or(1, |m| m + 1);
        let benefit = Benefit {
            id,
            category: new.category,
            description: new.description,
            annual_value: new.annual_value,
            confidence_level: new.confidence_level,
            start_year: new.start_year,
            ramp_up: new.ramp_up,
        };
        benefit.validate()?;
        self.benefits.push(benefit);
        Ok(id)
    }

    /// Apply `edit` to the benefit with `id`; the edit is discarded if the
    /// result fails validation.
    pub fn update_benefit<F>(&mut self, id: u32, edit: F) -> PathfinderResult<()>
    where
        F: FnOnce(&mut Benefit),
    {
        let slot = self
            .benefits
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| unknown_id("benefit", id))?;
        let mut edited = slot.clone();
        edit(&mut edited);
        edited.id = id;
        edited.validate()?;
        *slot = edited;
        Ok(())
    }

    pub fn add_cost(&mut self, new: NewCost) -> PathfinderResult<u32> {
        let id = self.costs.iter().map(|c| c.id).max().map_or(1, |m| m + 1);
        let cost = Cost {
            id,
            category: new.category,
            description: new.description,
            amount: new.amount,
            cost_type: new.cost_type,
            year: new.year,
        };
        cost.validate()?;
        self.costs.push(cost);
        Ok(id)
    }

    pub fn update_cost<F>(&mut self, id: u32, edit: F) -> PathfinderResult<()>
    where
        F: FnOnce(&mut Cost),
    {
        let slot = self
            .costs
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| unknown_id("cost", id))?;
        let mut edited = slot.clone();
        edit(&mut edited);
        edited.id = id;
        edited.validate()?;
        *slot = edited;
        Ok(())
    }

    pub fn benefit(&self, id: u32) -> Option<&Benefit> {
        self.benefits.iter().find(|b| b.id == id)
    }

    pub fn cost(&self, id: u32) -> Option<&Cost> {
        self.costs.iter().find(|c| c.id == id)
    }
}

fn unknown_id(kind: &str, id: u32) -> PathfinderError {
    PathfinderError::InvalidInput {
        field: format!("{kind}.id"),
        reason: format!("No {kind} with id {id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_benefit(value: Money) -> NewBenefit {
        NewBenefit {
            category: "Operational Efficiency".into(),
            description: "Automated incident triage".into(),
            annual_value: value,
            confidence_level: ConfidenceLevel::High,
            start_year: 1,
            ramp_up: vec![dec!(50), dec!(80), dec!(100)],
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut case = BusinessCase::new();
        assert_eq!(case.add_benefit(new_benefit(dec!(100))).unwrap(), 1);
        assert_eq!(case.add_benefit(new_benefit(dec!(200))).unwrap(), 2);
        let cost_id = case
            .add_cost(NewCost {
                category: "Licensing".into(),
                description: "Platform".into(),
                amount: dec!(50),
                cost_type: CostType::Recurring,
                year: 1,
            })
            .unwrap();
        assert_eq!(cost_id, 1);
    }

    #[test]
    fn test_update_in_place() {
        let mut case = BusinessCase::new();
        let id = case.add_benefit(new_benefit(dec!(100))).unwrap();
        case.update_benefit(id, |b| b.annual_value = dec!(150)).unwrap();
        assert_eq!(case.benefit(id).unwrap().annual_value, dec!(150));
    }

    #[test]
    fn test_invalid_edit_is_discarded() {
        let mut case = BusinessCase::new();
        let id = case.add_benefit(new_benefit(dec!(100))).unwrap();
        assert!(case.update_benefit(id, |b| b.annual_value = dec!(-1)).is_err());
        assert_eq!(case.benefit(id).unwrap().annual_value, dec!(100));
    }

    #[test]
    fn test_unknown_id() {
        let mut case = BusinessCase::new();
        assert!(case.update_cost(7, |c| c.amount = dec!(1)).is_err());
    }

    #[test]
    fn test_ramp_holds_last_entry() {
        let mut case = BusinessCase::new();
        let id = case.add_benefit(new_benefit(dec!(1000))).unwrap();
        let b = case.benefit(id).unwrap();
        assert_eq!(b.realized_in(0), Decimal::ZERO);
        assert_eq!(b.realized_in(1), dec!(500));
        assert_eq!(b.realized_in(2), dec!(800));
        assert_eq!(b.realized_in(5), dec!(1000));
    }

    #[test]
    fn test_empty_ramp_is_full_value() {
        let mut nb = new_benefit(dec!(1000));
        nb.ramp_up.clear();
        let mut case = BusinessCase::new();
        let id = case.add_benefit(nb).unwrap();
        assert_eq!(case.benefit(id).unwrap().realized_in(1), dec!(1000));
    }

    #[test]
    fn test_cost_timing() {
        let one_time = Cost {
            id: 1,
            category: "Implementation".into(),
            description: String::new(),
            amount: dec!(100),
            cost_type: CostType::OneTime,
            year: 0,
        };
        let recurring = Cost {
            cost_type: CostType::Recurring,
            year: 1,
            ..one_time.clone()
        };
        assert_eq!(one_time.incurred_in(0), dec!(100));
        assert_eq!(one_time.incurred_in(1), Decimal::ZERO);
        assert_eq!(recurring.incurred_in(0), Decimal::ZERO);
        assert_eq!(recurring.incurred_in(3), dec!(100));
    }

    #[test]
    fn test_amounts_above_ceiling_rejected() {
        use crate::validation::MAX_AMOUNT;
        let mut case = BusinessCase::new();
        assert!(case.add_benefit(new_benefit(MAX_AMOUNT * dec!(10))).is_err());
        assert!(case.benefits.is_empty());
    }

    #[test]
    fn test_cost_type_wire_names() {
        let json = serde_json::to_string(&CostType::OneTime).unwrap();
        assert_eq!(json, "\"one-time\"");
    }
}
