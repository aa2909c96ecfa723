use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::scoring::{
    NoopObserver, ScoreEvent, ScoreObserver, ScoringAggregator, ScoringConfig,
};

pub(super) const CONFIG_YAML: &str = r#"
weights:
  docking: 25
  adme_pk: 20
  toxicity: 20
  druggability: 10
  drug_likeness: 10
  off_target: 15
thresholds:
  docking:
    affinity: {high: -9.0, medium: -8.0, low: -7.0}
    rmsd_max: 2.5
    min_poses: 3
  adme_pk:
    logP_range: [1.0, 4.0]
    half_life_min: 2.0
    clearance_acceptable: [acceptable, low]
    cyp_inhibition_penalty: -5
  toxicity:
    max_flags_allowed: 2
    override_models: [DILIrank, ProTox-II]
  druggability:
    high_score: 0.7
    mid_score: 0.5
    bonus_volume_min: 400
    bonus_hydrophobicity_min: 0.5
    volume_hydrophobicity_bonus: 2
  drug_likeness:
    score_by_violations: {0: 10, 1: 5, 2: 2, 3: 0}
  off_target:
    si_thresholds: [2.0, 5.0, 10.0]
    low_target_bonus_threshold: 5
    low_target_bonus: 3
"#;

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::from_yaml_str(CONFIG_YAML, "inline").expect("inline config is valid")
}

pub(super) fn aggregator() -> ScoringAggregator {
    ScoringAggregator::new(scoring_config(), Arc::new(NoopObserver))
}

/// Every module at or near its ceiling.
pub(super) fn near_perfect_request() -> Value {
    json!({
        "docking": {"affinity_kcal": -9.5, "rmsd": 1.5, "num_converged_poses": 5},
        "adme_pk": {
            "logP": 3.0,
            "HIA": "high",
            "half_life_hr": 5,
            "CYP_inhibition": false,
            "clearance": "acceptable"
        },
        "toxicity": {"toxicity_flag": false, "num_models_flagged": 0, "high_risk_models": []},
        "druggability": {
            "pocket_score": 0.8,
            "volume": 450,
            "hydrophobicity": 0.6,
            "polarity": 0.2
        },
        "drug_likeness": {"num_violations": 0, "passes": true},
        "off_target": {
            "num_off_targets": 3,
            "avg_affinity_offtarget": -5.0,
            "selectivity_index": 12
        }
    })
}

/// Typical lead compound scoring 80.
pub(super) fn lead_request() -> Value {
    json!({
        "docking": {"affinity_kcal": -8.6, "rmsd": 2.1, "num_converged_poses": 4},
        "adme_pk": {
            "logP": 2.3,
            "HIA": "high",
            "half_life_hr": 3.4,
            "CYP_inhibition": false,
            "clearance": "acceptable"
        },
        "toxicity": {"toxicity_flag": true, "num_models_flagged": 1, "high_risk_models": []},
        "druggability": {
            "pocket_score": 0.78,
            "volume": 420,
            "hydrophobicity": 0.6,
            "polarity": 0.3
        },
        "drug_likeness": {"num_violations": 1, "passes": true},
        "off_target": {
            "num_off_targets": 4,
            "avg_affinity_offtarget": -6.1,
            "selectivity_index": 6.5
        }
    })
}

/// Raw module sum of exactly 69.
pub(super) fn just_below_go_request() -> Value {
    json!({
        "docking": {"affinity_kcal": -8.5, "rmsd": 1.0, "num_converged_poses": 4},
        "adme_pk": {
            "logP": 2.0,
            "HIA": "high",
            "half_life_hr": 4.0,
            "CYP_inhibition": false,
            "clearance": "acceptable"
        },
        "toxicity": {"num_models_flagged": 1, "high_risk_models": []},
        "druggability": {"pocket_score": 0.8, "volume": 450, "hydrophobicity": 0.6},
        "drug_likeness": {"num_violations": 2},
        "off_target": {"num_off_targets": 10, "selectivity_index": 3.0}
    })
}

/// Keeps a debug rendering of every event it receives.
#[derive(Default)]
pub(super) struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub(super) fn events(&self) -> Vec<String> {
        self.events.lock().expect("observer mutex poisoned").clone()
    }
}

impl ScoreObserver for RecordingObserver {
    fn record(&self, event: &ScoreEvent<'_>) {
        self.events
            .lock()
            .expect("observer mutex poisoned")
            .push(format!("{event:?}"));
    }
}
