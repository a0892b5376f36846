use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use pathfinder_core::business_case::{self, BusinessCaseInput};

use crate::input;

/// Arguments for business-case evaluation
#[derive(Args)]
pub struct BusinessCaseArgs {
    /// Path to JSON input file with benefits, costs and settings
    #[arg(long)]
    pub input: Option<String>,

    /// Confidence slider, 0–100 (overrides the input document)
    #[arg(long)]
    pub confidence: Option<Decimal>,

    /// Last year of the realization table (overrides the input document)
    #[arg(long)]
    pub horizon: Option<u32>,

    /// Discount rate as a fraction (e.g. 0.08); enables the discounted view
    #[arg(long)]
    pub discount_rate: Option<Decimal>,
}

pub fn run_business_case(args: BusinessCaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut case_input: BusinessCaseInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file (or piped JSON) is required for a business case".into());
    };

    if let Some(confidence) = args.confidence {
        case_input.confidence_level = confidence;
    }
    if let Some(horizon) = args.horizon {
        case_input.horizon_years = horizon;
    }
    if args.discount_rate.is_some() {
        case_input.discount_rate = args.discount_rate;
    }

    let result = business_case::evaluate_business_case(&case_input)?;
    Ok(serde_json::to_value(result)?)
}
