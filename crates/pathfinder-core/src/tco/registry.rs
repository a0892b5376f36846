use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::PathfinderError;
use crate::types::Money;
use crate::PathfinderResult;

use super::comparator::{CostStructure, OfferingInput, TcoInput};

/// Name used for the subject offering in registry-built comparisons.
pub const SUBJECT_NAME: &str = "DXC";

/// Cost profile of the subject and one competitor within one industry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcoProfile {
    pub subject: CostStructure,
    pub competitor: CostStructure,
    pub subject_decay: Vec<Decimal>,
    pub competitor_decay: Vec<Decimal>,
}

/// Serialized form of a registry entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub industry: String,
    pub competitor: String,
    #[serde(flatten)]
    pub profile: TcoProfile,
}

/// Keyed lookup of (industry, competitor) → cost profile.
///
/// Construction validates that every declared industry has a profile for
/// every declared competitor, so a lookup of two known keys cannot miss.
#[derive(Debug, Clone)]
pub struct CostStructureRegistry {
    industries: BTreeSet<String>,
    competitors: BTreeSet<String>,
    profiles: BTreeMap<(String, String), TcoProfile>,
}

impl CostStructureRegistry {
    pub fn from_entries(entries: Vec<RegistryEntry>) -> PathfinderResult<Self> {
        if entries.is_empty() {
            return Err(PathfinderError::RegistryError(
                "Cost-structure registry has no entries".into(),
            ));
        }

        let mut industries = BTreeSet::new();
        let mut competitors = BTreeSet::new();
        let mut profiles = BTreeMap::new();

        for entry in entries {
            validate_profile(&entry)?;
            industries.insert(entry.industry.clone());
            competitors.insert(entry.competitor.clone());
            let key = (entry.industry, entry.competitor);
            if profiles.contains_key(&key) {
                return Err(PathfinderError::RegistryError(format!(
                    "Duplicate profile for industry '{}' and competitor '{}'",
                    key.0, key.1
                )));
            }
            profiles.insert(key, entry.profile);
        }

        let missing: Vec<String> = industries
            .iter()
            .flat_map(|i| competitors.iter().map(move |c| (i, c)))
            .filter(|(i, c)| !profiles.contains_key(&((*i).clone(), (*c).clone())))
            .map(|(i, c)| format!("{i}/{c}"))
            .collect();
        if !missing.is_empty() {
            return Err(PathfinderError::RegistryError(format!(
                "Missing cost profiles for: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            industries,
            competitors,
            profiles,
        })
    }

    pub fn industries(&self) -> impl Iterator<Item = &str> {
        self.industries.iter().map(String::as_str)
    }

    pub fn competitors(&self) -> impl Iterator<Item = &str> {
        self.competitors.iter().map(String::as_str)
    }

    pub fn profile(&self, industry: &str, competitor: &str) -> PathfinderResult<&TcoProfile> {
        self.profiles
            .get(&(industry.to_string(), competitor.to_string()))
            .ok_or_else(|| {
                PathfinderError::RegistryError(format!(
                    "No cost profile for industry '{industry}' and competitor '{competitor}'"
                ))
            })
    }

    pub fn entries(&self) -> Vec<RegistryEntry> {
        self.profiles
            .iter()
            .map(|((industry, competitor), profile)| RegistryEntry {
                industry: industry.clone(),
                competitor: competitor.clone(),
                profile: profile.clone(),
            })
            .collect()
    }

    /// Sample data shipped with the dashboard.
    pub fn builtin() -> PathfinderResult<Self> {
        Self::from_entries(builtin_entries())
    }
}

/// Assemble a TCO comparison for an (industry, competitor) pair.
pub fn tco_input_from_registry(
    registry: &CostStructureRegistry,
    industry: &str,
    competitor: &str,
    subject_investment: Money,
    competitor_investment: Money,
    years: u32,
) -> PathfinderResult<TcoInput> {
    let profile = registry.profile(industry, competitor)?;
    Ok(TcoInput {
        subject: OfferingInput {
            name: SUBJECT_NAME.to_string(),
            initial_investment: subject_investment,
            cost_structure: profile.subject.clone(),
            decay_factors: profile.subject_decay.clone(),
        },
        comparator: OfferingInput {
            name: competitor.to_string(),
            initial_investment: competitor_investment,
            cost_structure: profile.competitor.clone(),
            decay_factors: profile.competitor_decay.clone(),
        },
        years,
    })
}

fn validate_profile(entry: &RegistryEntry) -> PathfinderResult<()> {
    let key = format!("{}/{}", entry.industry, entry.competitor);
    let wrap = |e: PathfinderError| PathfinderError::RegistryError(format!("{key}: {e}"));

    entry.profile.subject.validate("subject").map_err(wrap)?;
    entry.profile.competitor.validate("competitor").map_err(wrap)?;

    for (side, decay) in [
        ("subject_decay", &entry.profile.subject_decay),
        ("competitor_decay", &entry.profile.competitor_decay),
    ] {
        if decay.is_empty() {
            return Err(PathfinderError::RegistryError(format!(
                "{key}: {side} is empty"
            )));
        }
        if decay.iter().any(|f| *f < Decimal::ZERO) {
            return Err(PathfinderError::RegistryError(format!(
                "{key}: {side} contains a negative factor"
            )));
        }
    }
    Ok(())
}

fn cs(
    implementation: Decimal,
    licensing: Decimal,
    support: Decimal,
    maintenance: Decimal,
    training: Decimal,
    security: Decimal,
) -> CostStructure {
    CostStructure {
        implementation,
        licensing,
        support,
        maintenance,
        training,
        security,
    }
}

fn builtin_entries() -> Vec<RegistryEntry> {
    let subject_decay = vec![dec!(1.0), dec!(0.65), dec!(0.60), dec!(0.58), dec!(0.55)];

    let rows: [(&str, &str, CostStructure, CostStructure, [Decimal; 5]); 6] = [
        (
            "financial_services",
            "accenture",
            cs(dec!(0.25), dec!(0.20), dec!(0.15), dec!(0.12), dec!(0.08), dec!(0.10)),
            cs(dec!(0.30), dec!(0.22), dec!(0.18), dec!(0.15), dec!(0.10), dec!(0.08)),
            [dec!(1.0), dec!(0.70), dec!(0.75), dec!(0.72), dec!(0.70)],
        ),
        (
            "financial_services",
            "ibm",
            cs(dec!(0.25), dec!(0.20), dec!(0.15), dec!(0.12), dec!(0.08), dec!(0.10)),
            cs(dec!(0.28), dec!(0.30), dec!(0.20), dec!(0.14), dec!(0.07), dec!(0.09)),
            [dec!(1.0), dec!(0.75), dec!(0.78), dec!(0.76), dec!(0.74)],
        ),
        (
            "healthcare",
            "accenture",
            cs(dec!(0.22), dec!(0.18), dec!(0.16), dec!(0.12), dec!(0.10), dec!(0.14)),
            cs(dec!(0.28), dec!(0.20), dec!(0.18), dec!(0.15), dec!(0.12), dec!(0.12)),
            [dec!(1.0), dec!(0.72), dec!(0.74), dec!(0.71), dec!(0.69)],
        ),
        (
            "healthcare",
            "ibm",
            cs(dec!(0.22), dec!(0.18), dec!(0.16), dec!(0.12), dec!(0.10), dec!(0.14)),
            cs(dec!(0.26), dec!(0.28), dec!(0.19), dec!(0.14), dec!(0.08), dec!(0.13)),
            [dec!(1.0), dec!(0.76), dec!(0.79), dec!(0.77), dec!(0.75)],
        ),
        (
            "manufacturing",
            "accenture",
            cs(dec!(0.28), dec!(0.17), dec!(0.14), dec!(0.15), dec!(0.09), dec!(0.08)),
            cs(dec!(0.32), dec!(0.19), dec!(0.16), dec!(0.17), dec!(0.11), dec!(0.07)),
            [dec!(1.0), dec!(0.68), dec!(0.72), dec!(0.70), dec!(0.67)],
        ),
        (
            "manufacturing",
            "ibm",
            cs(dec!(0.28), dec!(0.17), dec!(0.14), dec!(0.15), dec!(0.09), dec!(0.08)),
            cs(dec!(0.30), dec!(0.26), dec!(0.18), dec!(0.16), dec!(0.08), dec!(0.08)),
            [dec!(1.0), dec!(0.74), dec!(0.77), dec!(0.75), dec!(0.73)],
        ),
    ];

    rows.into_iter()
        .map(|(industry, competitor, subject, comp, decay)| RegistryEntry {
            industry: industry.to_string(),
            competitor: competitor.to_string(),
            profile: TcoProfile {
                subject,
                competitor: comp,
                subject_decay: subject_decay.clone(),
                competitor_decay: decay.to_vec(),
            },
        })
        .collect()
}
