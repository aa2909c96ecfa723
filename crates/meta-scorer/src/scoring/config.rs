use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use super::error::{ConfigError, ScoringError};
use super::module::ModuleName;

/// Location of the scoring configuration when none is supplied.
pub const DEFAULT_CONFIG_PATH: &str = "config/score_config.yaml";

const WEIGHTS_SECTION: &str = "weights";
const THRESHOLDS_SECTION: &str = "thresholds";

/// Weights and per-module thresholds loaded once per aggregator.
///
/// Only key presence is checked at load time. Threshold values stay as raw
/// YAML until a rule decodes them into its typed shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    weights: BTreeMap<ModuleName, Value>,
    thresholds: BTreeMap<ModuleName, Value>,
}

impl ScoringConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(ConfigError::NotFound { path: display });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        Self::from_yaml_str(&content, &display)
    }

    /// Parse and validate a configuration document. `origin` only feeds error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Err(ConfigError::Empty {
                path: origin.to_string(),
            });
        }

        let document: Value = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;

        let root = match document {
            Value::Null => {
                return Err(ConfigError::Empty {
                    path: origin.to_string(),
                })
            }
            Value::Mapping(root) if root.is_empty() => {
                return Err(ConfigError::Empty {
                    path: origin.to_string(),
                })
            }
            Value::Mapping(root) => root,
            _ => {
                return Err(ConfigError::NotAMapping {
                    path: origin.to_string(),
                })
            }
        };

        let weights = section(&root, WEIGHTS_SECTION)?;
        let thresholds = section(&root, THRESHOLDS_SECTION)?;

        let mut config = Self {
            weights: BTreeMap::new(),
            thresholds: BTreeMap::new(),
        };

        for module in ModuleName::ordered() {
            let weight = weights
                .get(module.key())
                .ok_or(ConfigError::MissingWeight(module))?;
            let module_thresholds = thresholds
                .get(module.key())
                .ok_or(ConfigError::MissingThresholds(module))?;

            config.weights.insert(module, weight.clone());
            config.thresholds.insert(module, module_thresholds.clone());
        }

        Ok(config)
    }

    /// Informational weight for a module, when it is numeric.
    pub fn weight(&self, module: ModuleName) -> Option<f64> {
        self.weights.get(&module).and_then(Value::as_f64)
    }

    /// Decode a module's thresholds into the shape its rule expects.
    pub(crate) fn thresholds<T: DeserializeOwned>(
        &self,
        module: ModuleName,
    ) -> Result<T, ScoringError> {
        let raw = self.thresholds.get(&module).cloned().unwrap_or(Value::Null);
        serde_yaml::from_value(raw).map_err(|source| ScoringError::Thresholds { module, source })
    }
}

fn section<'a>(root: &'a Mapping, name: &'static str) -> Result<&'a Mapping, ConfigError> {
    match root.get(name) {
        None => Err(ConfigError::MissingSection(name)),
        Some(Value::Mapping(entries)) => Ok(entries),
        Some(_) => Err(ConfigError::InvalidSection(name)),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct AffinityThresholds {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct DockingThresholds {
    pub affinity: AffinityThresholds,
    pub rmsd_max: f64,
    pub min_poses: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct AdmePkThresholds {
    #[serde(rename = "logP_range")]
    pub logp_range: [f64; 2],
    pub half_life_min: f64,
    pub clearance_acceptable: Vec<String>,
    pub cyp_inhibition_penalty: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct ToxicityThresholds {
    pub max_flags_allowed: u32,
    pub override_models: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct DruggabilityThresholds {
    pub high_score: f64,
    pub mid_score: f64,
    pub bonus_volume_min: f64,
    pub bonus_hydrophobicity_min: f64,
    pub volume_hydrophobicity_bonus: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct DrugLikenessThresholds {
    pub score_by_violations: BTreeMap<u32, i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct OffTargetThresholds {
    pub si_thresholds: [f64; 3],
    pub low_target_bonus_threshold: u32,
    pub low_target_bonus: i32,
}
