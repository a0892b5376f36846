use serde::{Deserialize, Serialize};

use pathfinder_core::growth::{GrowthScenario, ScenarioCatalog};
use pathfinder_core::risk_roi::RiskProfileTable;
use pathfinder_core::tco::{CostStructureRegistry, RegistryEntry};

use super::file;

/// On-disk reference data. Any section left out falls back to the
/// built-in data.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_structures: Option<Vec<RegistryEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_scenarios: Option<Vec<GrowthScenario>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_profiles: Option<RiskProfileTable>,
}

/// Validated reference data used by the commands.
pub struct ReferenceData {
    pub registry: CostStructureRegistry,
    pub scenarios: ScenarioCatalog,
    pub risk_profiles: RiskProfileTable,
}

impl ReferenceData {
    /// Built-in data, overridden section by section by `--catalog`.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc: CatalogDocument = match path {
            Some(p) => file::read_structured(p)?,
            None => CatalogDocument::default(),
        };
        let reference = Self::from_document(doc)?;

        tracing::debug!(
            source = path.unwrap_or("builtin"),
            industries = reference.registry.industries().count(),
            competitors = reference.registry.competitors().count(),
            scenarios = reference.scenarios.scenarios.len(),
            "reference data loaded"
        );
        Ok(reference)
    }

    pub fn from_document(doc: CatalogDocument) -> Result<Self, Box<dyn std::error::Error>> {
        let registry = match doc.cost_structures {
            Some(entries) => CostStructureRegistry::from_entries(entries)?,
            None => CostStructureRegistry::builtin()?,
        };

        let scenarios = match doc.growth_scenarios {
            Some(list) if list.is_empty() => {
                return Err("Catalog 'growth_scenarios' must not be empty".into())
            }
            Some(list) => ScenarioCatalog { scenarios: list },
            None => ScenarioCatalog::builtin(),
        };

        let risk_profiles = doc.risk_profiles.unwrap_or_default();
        risk_profiles.validate()?;

        Ok(Self {
            registry,
            scenarios,
            risk_profiles,
        })
    }

    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            cost_structures: Some(self.registry.entries()),
            growth_scenarios: Some(self.scenarios.scenarios.clone()),
            risk_profiles: Some(self.risk_profiles.clone()),
        }
    }
}
