//! Risk-adjusted ROI: confidence-weighted benefits and costs scaled by a
//! named risk profile, with competitor ROI derived from the subject's.

pub mod model;
pub mod profiles;

pub use model::{
    calculate_risk_adjusted_roi, ComparatorRoi, ComparatorScaling, RiskRoiInput, RiskRoiOutput,
    WeightedItem,
};
pub use profiles::{RiskAdjustment, RiskProfile, RiskProfileTable};
