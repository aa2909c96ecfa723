use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::{InputError, ScoringError};
use super::module::ModuleName;

/// Check that a score request is a non-empty mapping naming all six modules.
///
/// Every missing module is reported at once. The shape of each record is not
/// inspected here; absent fields fall back to the record defaults.
pub fn validate_input(outputs: &Value) -> Result<&Map<String, Value>, InputError> {
    let modules = outputs.as_object().ok_or(InputError::NotAMapping)?;
    if modules.is_empty() {
        return Err(InputError::Empty);
    }

    let missing: Vec<ModuleName> = ModuleName::ordered()
        .into_iter()
        .filter(|module| !modules.contains_key(module.key()))
        .collect();
    if !missing.is_empty() {
        return Err(InputError::MissingModules(missing));
    }

    Ok(modules)
}

/// Docking simulation summary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DockingOutput {
    /// Binding affinity in kcal/mol; more negative is better. Defaults to 0.
    pub affinity_kcal: f64,
    /// Pose RMSD in angstroms. Defaults to unbounded, which always trips the penalty.
    pub rmsd: f64,
    /// Defaults to 0. Integral floats such as `4.0` are accepted.
    pub num_converged_poses: f64,
}

impl Default for DockingOutput {
    fn default() -> Self {
        Self {
            affinity_kcal: 0.0,
            rmsd: f64::INFINITY,
            num_converged_poses: 0.0,
        }
    }
}

/// ADME/PK predictions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdmePkOutput {
    /// Defaults to -1, outside any sensible lipophilicity window.
    #[serde(rename = "logP")]
    pub logp: f64,
    /// Human intestinal absorption class. Defaults to empty.
    #[serde(rename = "HIA")]
    pub hia: String,
    /// Defaults to 0.
    pub half_life_hr: f64,
    /// Clearance class. Defaults to empty.
    pub clearance: String,
    /// Defaults to false.
    #[serde(rename = "CYP_inhibition")]
    pub cyp_inhibition: bool,
}

impl Default for AdmePkOutput {
    fn default() -> Self {
        Self {
            logp: -1.0,
            hia: String::new(),
            half_life_hr: 0.0,
            clearance: String::new(),
            cyp_inhibition: false,
        }
    }
}

/// Toxicity model consensus. Defaults to no flags and no high-risk models.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToxicityOutput {
    pub num_models_flagged: f64,
    pub high_risk_models: Vec<String>,
}

/// Pocket druggability assessment. Every field defaults to 0.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DruggabilityOutput {
    pub pocket_score: f64,
    pub volume: f64,
    pub hydrophobicity: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DrugLikenessOutput {
    /// Rule-of-five style violations. Defaults to unbounded, which scores as the
    /// worst entry of the violations table.
    pub num_violations: f64,
}

impl Default for DrugLikenessOutput {
    fn default() -> Self {
        Self {
            num_violations: f64::INFINITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OffTargetOutput {
    /// Defaults to 0.
    pub selectivity_index: f64,
    /// Defaults to unbounded, which never earns the low off-target bonus.
    pub num_off_targets: f64,
}

impl Default for OffTargetOutput {
    fn default() -> Self {
        Self {
            selectivity_index: 0.0,
            num_off_targets: f64::INFINITY,
        }
    }
}

/// Typed view over the six upstream module records of one compound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleOutputBundle {
    pub docking: DockingOutput,
    pub adme_pk: AdmePkOutput,
    pub toxicity: ToxicityOutput,
    pub druggability: DruggabilityOutput,
    pub drug_likeness: DrugLikenessOutput,
    pub off_target: OffTargetOutput,
}

impl ModuleOutputBundle {
    /// Validate a raw score request and decode each module record.
    pub fn from_value(outputs: &Value) -> Result<Self, ScoringError> {
        let modules = validate_input(outputs)?;

        Ok(Self {
            docking: decode(modules, ModuleName::Docking)?,
            adme_pk: decode(modules, ModuleName::AdmePk)?,
            toxicity: decode(modules, ModuleName::Toxicity)?,
            druggability: decode(modules, ModuleName::Druggability)?,
            drug_likeness: decode(modules, ModuleName::DrugLikeness)?,
            off_target: decode(modules, ModuleName::OffTarget)?,
        })
    }
}

fn decode<T: DeserializeOwned>(
    modules: &Map<String, Value>,
    module: ModuleName,
) -> Result<T, ScoringError> {
    let record = modules
        .get(module.key())
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));
    serde_json::from_value(record).map_err(|source| ScoringError::Record { module, source })
}
