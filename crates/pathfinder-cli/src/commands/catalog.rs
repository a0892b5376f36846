use clap::{Args, ValueEnum};
use serde_json::Value;

use crate::input::catalog::ReferenceData;

#[derive(Debug, Clone, ValueEnum)]
pub enum CatalogSection {
    CostStructures,
    GrowthScenarios,
    RiskProfiles,
}

/// Arguments for printing reference data
#[derive(Args)]
pub struct CatalogArgs {
    /// JSON or YAML reference data to validate and print instead of the built-ins
    #[arg(long)]
    pub catalog: Option<String>,

    /// Print one section only
    #[arg(long)]
    pub section: Option<CatalogSection>,
}

pub fn run_catalog(args: CatalogArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let reference = ReferenceData::load(args.catalog.as_deref())?;
    let value = match args.section {
        None => serde_json::to_value(reference.to_document())?,
        Some(CatalogSection::CostStructures) => serde_json::to_value(reference.registry.entries())?,
        Some(CatalogSection::GrowthScenarios) => {
            serde_json::to_value(&reference.scenarios.scenarios)?
        }
        Some(CatalogSection::RiskProfiles) => serde_json::to_value(&reference.risk_profiles)?,
    };
    Ok(value)
}
