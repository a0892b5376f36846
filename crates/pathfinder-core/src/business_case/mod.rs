//! Business-case engine: itemised benefits (with ramp-up curves) and costs
//! aggregated into headline totals, a realization table, confidence-scaled
//! metrics, a fixed scenario table and an optional discounted-cash-flow view.

pub mod dcf;
pub mod engine;
pub mod items;
pub mod scenarios;

pub use dcf::DiscountedCashFlow;
pub use engine::{
    evaluate_business_case, BusinessCaseInput, BusinessCaseOutput, FinancialMetrics,
    RealizationYear,
};
pub use items::{Benefit, BusinessCase, ConfidenceLevel, Cost, CostType, NewBenefit, NewCost};
pub use scenarios::{default_case_scenarios, CaseScenario, ScenarioTable};
