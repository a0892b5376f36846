use napi::Result as NapiResult;
use napi_derive::napi;

use pathfinder_core::{business_case, growth, risk_roi, tco, value_realization};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// TCO
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_tco(input_json: String) -> NapiResult<String> {
    let input: tco::TcoInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = tco::compare_tco(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Built-in (industry, competitor) cost structures.
#[napi]
pub fn cost_structures() -> NapiResult<String> {
    let registry = tco::CostStructureRegistry::builtin().map_err(to_napi_error)?;
    serde_json::to_string(&registry.entries()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Value realization
// ---------------------------------------------------------------------------

#[napi]
pub fn build_timeline(input_json: String) -> NapiResult<String> {
    let input: value_realization::TimelineInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = value_realization::build_timeline(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Risk-adjusted ROI
// ---------------------------------------------------------------------------

#[napi]
pub fn risk_adjusted_roi(input_json: String) -> NapiResult<String> {
    let input: risk_roi::RiskRoiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = risk_roi::calculate_risk_adjusted_roi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn risk_profiles() -> NapiResult<String> {
    serde_json::to_string(&risk_roi::RiskProfileTable::default()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

#[napi]
pub fn project_growth(input_json: String) -> NapiResult<String> {
    let input: growth::GrowthInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = growth::project_growth(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn growth_scenarios() -> NapiResult<String> {
    serde_json::to_string(&growth::ScenarioCatalog::builtin()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Business case
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_business_case(input_json: String) -> NapiResult<String> {
    let input: business_case::BusinessCaseInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = business_case::evaluate_business_case(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct ScenarioRequest {
    scenario: String,
    /// Widget query string, e.g. "investment=70&speed=60&pressure=30"
    #[serde(default)]
    query: Option<String>,
    horizon_years: u32,
}

/// Project a built-in scenario by name with sliders from a query string.
#[napi]
pub fn project_growth_scenario(request_json: String) -> NapiResult<String> {
    let request: ScenarioRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let catalog = growth::ScenarioCatalog::builtin();
    let scenario = catalog.scenario(&request.scenario).map_err(to_napi_error)?.clone();
    let sliders = match request.query.as_deref() {
        Some(q) => growth::SliderSettings::from_query(q).map_err(to_napi_error)?,
        None => growth::SliderSettings::default(),
    };
    let input = growth::GrowthInput {
        scenario,
        sliders,
        horizon_years: request.horizon_years,
    };
    let output = growth::project_growth(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
