use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The six evaluation domains contributing to a suitability score.
///
/// Variant order is the fixed evaluation order, and `Ord` follows it so that
/// breakdowns serialize in the same order the rules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleName {
    Docking,
    AdmePk,
    Toxicity,
    Druggability,
    DrugLikeness,
    OffTarget,
}

impl ModuleName {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Docking,
            Self::AdmePk,
            Self::Toxicity,
            Self::Druggability,
            Self::DrugLikeness,
            Self::OffTarget,
        ]
    }

    /// Key used in configuration documents and score requests.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Docking => "docking",
            Self::AdmePk => "adme_pk",
            Self::Toxicity => "toxicity",
            Self::Druggability => "druggability",
            Self::DrugLikeness => "drug_likeness",
            Self::OffTarget => "off_target",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Docking => "Docking",
            Self::AdmePk => "ADME/PK",
            Self::Toxicity => "Toxicity",
            Self::Druggability => "Druggability",
            Self::DrugLikeness => "Drug-likeness",
            Self::OffTarget => "Off-target selectivity",
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-module integer scores, keyed in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBreakdown(BTreeMap<ModuleName, i32>);

impl ScoreBreakdown {
    pub(crate) fn insert(&mut self, module: ModuleName, score: i32) {
        self.0.insert(module, score);
    }

    pub fn get(&self, module: ModuleName) -> Option<i32> {
        self.0.get(&module).copied()
    }

    /// Raw, unclamped sum of every module score.
    pub fn total(&self) -> i64 {
        self.0.values().map(|score| i64::from(*score)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModuleName, i32)> + '_ {
        self.0.iter().map(|(module, score)| (*module, *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ModuleName, i32)> for ScoreBreakdown {
    fn from_iter<I: IntoIterator<Item = (ModuleName, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
