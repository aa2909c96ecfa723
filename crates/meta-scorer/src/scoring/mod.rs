//! Suitability scoring for drug candidate compounds.
//!
//! Six upstream evaluation modules each emit a record; every record is scored
//! by an independent rule, the scores are summed and clamped into `0..=100`,
//! and a go/no-go decision is derived from the clamped score and any
//! toxicity override.

mod config;
mod error;
mod input;
mod module;
mod observer;
mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{ScoringConfig, DEFAULT_CONFIG_PATH};
pub use error::{ConfigError, InputError, ScoringError};
pub use input::{
    validate_input, AdmePkOutput, DockingOutput, DrugLikenessOutput, DruggabilityOutput,
    ModuleOutputBundle, OffTargetOutput, ToxicityOutput,
};
pub use module::{ModuleName, ScoreBreakdown};
pub use observer::{NoopObserver, ScoreEvent, ScoreObserver, TracingObserver};
pub use policy::{clamp_svs, GoDecision, GO_THRESHOLD, SVS_MAX};

use std::path::Path;
use std::sync::Arc;

use policy::decide_outcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Aggregates module outputs against a configuration loaded once at construction.
///
/// The configuration is never mutated after construction, so one aggregator can
/// be shared across threads and reused for any number of requests.
#[derive(Clone)]
pub struct ScoringAggregator {
    config: Arc<ScoringConfig>,
    observer: Arc<dyn ScoreObserver>,
}

impl ScoringAggregator {
    pub fn new(config: ScoringConfig, observer: Arc<dyn ScoreObserver>) -> Self {
        Self {
            config: Arc::new(config),
            observer,
        }
    }

    pub fn from_path(
        path: impl AsRef<Path>,
        observer: Arc<dyn ScoreObserver>,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = ScoringConfig::from_path(path)?;
        observer.record(&ScoreEvent::ConfigLoaded { path });
        Ok(Self::new(config, observer))
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Validate a raw score request and aggregate it.
    pub fn aggregate(&self, outputs: &Value) -> Result<AggregationResult, ScoringError> {
        let bundle = ModuleOutputBundle::from_value(outputs)?;
        self.aggregate_bundle(&bundle)
    }

    pub fn aggregate_bundle(
        &self,
        bundle: &ModuleOutputBundle,
    ) -> Result<AggregationResult, ScoringError> {
        self.observer.record(&ScoreEvent::AggregationStarted);

        let mut score_breakdown = ScoreBreakdown::default();
        let mut failure_rationale = Vec::new();

        for (module, rule) in rules::RULES {
            let outcome = rule(bundle, &self.config)?;
            self.observer.record(&ScoreEvent::ModuleScored {
                module,
                score: outcome.score,
            });

            if let Some(reason) = outcome.override_reason {
                self.observer.record(&ScoreEvent::OverrideTriggered {
                    module,
                    reason: &reason,
                });
                failure_rationale.push(format!("{} override triggered: {reason}", module.label()));
            }

            score_breakdown.insert(module, outcome.score);
        }

        let svs_score = clamp_svs(score_breakdown.total());
        let go_decision = decide_outcome(svs_score, &failure_rationale);

        self.observer.record(&ScoreEvent::AggregationCompleted {
            svs_score,
            decision: go_decision,
        });

        Ok(AggregationResult {
            svs_score,
            go_decision,
            score_breakdown,
            failure_rationale,
        })
    }
}

/// Composite suitability score and decision trail for one compound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub svs_score: u8,
    pub go_decision: GoDecision,
    pub score_breakdown: ScoreBreakdown,
    pub failure_rationale: Vec<String>,
}

/// Score a request against [`DEFAULT_CONFIG_PATH`], logging through `tracing`.
pub fn aggregate_scores(outputs: &Value) -> Result<AggregationResult, ScoringError> {
    let aggregator =
        ScoringAggregator::from_path(DEFAULT_CONFIG_PATH, Arc::new(TracingObserver))?;
    aggregator.aggregate(outputs)
}
