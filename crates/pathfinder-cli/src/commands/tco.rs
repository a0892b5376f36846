use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use pathfinder_core::tco::{self, TcoInput};

use crate::input;
use crate::input::catalog::ReferenceData;

/// Arguments for a TCO comparison
#[derive(Args)]
pub struct TcoArgs {
    /// Path to JSON input file with a full comparison (overrides flags)
    #[arg(long)]
    pub input: Option<String>,

    /// JSON or YAML reference data replacing the built-in cost structures
    #[arg(long)]
    pub catalog: Option<String>,

    /// Industry key in the cost-structure registry (e.g. healthcare)
    #[arg(long)]
    pub industry: Option<String>,

    /// Competitor key in the cost-structure registry (e.g. accenture)
    #[arg(long)]
    pub competitor: Option<String>,

    /// Initial investment of the subject offering
    #[arg(long)]
    pub subject_investment: Option<Decimal>,

    /// Initial investment of the competitor offering
    #[arg(long)]
    pub competitor_investment: Option<Decimal>,

    /// Comparison horizon in years
    #[arg(long, default_value = "5")]
    pub years: u32,
}

pub fn run_tco(args: TcoArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let tco_input: TcoInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let reference = ReferenceData::load(args.catalog.as_deref())?;
        let industry = args
            .industry
            .ok_or("--industry is required (or provide --input)")?;
        let competitor = args
            .competitor
            .ok_or("--competitor is required (or provide --input)")?;
        let subject_investment = args
            .subject_investment
            .ok_or("--subject-investment is required (or provide --input)")?;
        let competitor_investment = args
            .competitor_investment
            .ok_or("--competitor-investment is required (or provide --input)")?;
        tco::tco_input_from_registry(
            &reference.registry,
            &industry,
            &competitor,
            subject_investment,
            competitor_investment,
            args.years,
        )?
    };

    let result = tco::compare_tco(&tco_input)?;
    Ok(serde_json::to_value(result)?)
}
