//! Total-cost-of-ownership comparison between the subject offering and a
//! competitor, plus the (industry, competitor) cost-structure registry.

pub mod comparator;
pub mod registry;

pub use comparator::{
    compare_tco, CostStructure, OfferingInput, TcoInput, TcoOutput, TcoPosition,
    YearlyCostBreakdown,
};
pub use registry::{tco_input_from_registry, CostStructureRegistry, RegistryEntry, TcoProfile};
