use clap::Args;
use serde_json::Value;

use pathfinder_core::risk_roi::{self, RiskProfile, RiskRoiInput};

use crate::input;
use crate::input::catalog::ReferenceData;

/// Arguments for risk-adjusted ROI
#[derive(Args)]
pub struct RiskRoiArgs {
    /// Path to JSON input file with benefits, costs and comparators
    #[arg(long)]
    pub input: Option<String>,

    /// Override the risk profile named in the input (low, moderate, high)
    #[arg(long)]
    pub risk_profile: Option<RiskProfile>,

    /// JSON or YAML reference data supplying the risk profile multipliers
    #[arg(long)]
    pub catalog: Option<String>,
}

pub fn run_risk_roi(args: RiskRoiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut roi_input: RiskRoiInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file (or piped JSON) is required for risk-adjusted ROI".into());
    };

    if let Some(profile) = args.risk_profile {
        roi_input.risk_profile = profile;
    }
    // A table in the input document wins over the catalog
    if roi_input.profile_table.is_none() && args.catalog.is_some() {
        let reference = ReferenceData::load(args.catalog.as_deref())?;
        roi_input.profile_table = Some(reference.risk_profiles);
    }

    let result = risk_roi::calculate_risk_adjusted_roi(&roi_input)?;
    Ok(serde_json::to_value(result)?)
}
