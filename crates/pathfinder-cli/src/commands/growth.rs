use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use pathfinder_core::growth::{self, GrowthInput, SliderSettings};

use crate::input;
use crate::input::catalog::ReferenceData;

/// Arguments for a growth what-if projection
#[derive(Args)]
pub struct GrowthArgs {
    /// Path to JSON input file with scenario, sliders and horizon
    #[arg(long)]
    pub input: Option<String>,

    /// JSON or YAML reference data replacing the built-in scenarios
    #[arg(long)]
    pub catalog: Option<String>,

    /// Scenario name from the catalog
    #[arg(long, default_value = "digital_transformation")]
    pub scenario: String,

    /// Slider settings as a query string, e.g. "investment=70&speed=60&pressure=30"
    #[arg(long)]
    pub query: Option<String>,

    /// Investment level slider, 0–100
    #[arg(long)]
    pub investment: Option<Decimal>,

    /// Execution speed slider, 0–100
    #[arg(long)]
    pub speed: Option<Decimal>,

    /// Competitive pressure slider, 0–100
    #[arg(long)]
    pub pressure: Option<Decimal>,

    /// Projection horizon in years
    #[arg(long, default_value = "5")]
    pub years: u32,
}

pub fn run_growth(args: GrowthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let growth_input: GrowthInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let reference = ReferenceData::load(args.catalog.as_deref())?;
        let scenario = reference.scenarios.scenario(&args.scenario)?.clone();

        let mut sliders = match args.query {
            Some(ref q) => SliderSettings::from_query(q)?,
            None => SliderSettings::default(),
        };
        // Individual flags win over the query string
        if let Some(v) = args.investment {
            sliders.investment_level = v;
        }
        if let Some(v) = args.speed {
            sliders.execution_speed = v;
        }
        if let Some(v) = args.pressure {
            sliders.competitive_pressure = v;
        }

        GrowthInput {
            scenario,
            sliders,
            horizon_years: args.years,
        }
    };

    let result = growth::project_growth(&growth_input)?;
    Ok(serde_json::to_value(result)?)
}
