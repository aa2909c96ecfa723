use super::config::{
    AdmePkThresholds, DockingThresholds, DrugLikenessThresholds, DruggabilityThresholds,
    OffTargetThresholds, ScoringConfig, ToxicityThresholds,
};
use super::error::ScoringError;
use super::input::{
    AdmePkOutput, DockingOutput, DrugLikenessOutput, DruggabilityOutput, ModuleOutputBundle,
    OffTargetOutput, ToxicityOutput,
};
use super::module::ModuleName;

/// Score produced by one module rule. Only toxicity ever sets an override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuleOutcome {
    pub score: i32,
    pub override_reason: Option<String>,
}

impl RuleOutcome {
    fn scored(score: i32) -> Self {
        Self {
            score,
            override_reason: None,
        }
    }
}

type Rule = fn(&ModuleOutputBundle, &ScoringConfig) -> Result<RuleOutcome, ScoringError>;

/// Rules in evaluation order. The module set is closed, so dispatch is static.
pub(crate) const RULES: [(ModuleName, Rule); 6] = [
    (ModuleName::Docking, docking_rule),
    (ModuleName::AdmePk, adme_pk_rule),
    (ModuleName::Toxicity, toxicity_rule),
    (ModuleName::Druggability, druggability_rule),
    (ModuleName::DrugLikeness, drug_likeness_rule),
    (ModuleName::OffTarget, off_target_rule),
];

fn docking_rule(
    bundle: &ModuleOutputBundle,
    config: &ScoringConfig,
) -> Result<RuleOutcome, ScoringError> {
    let thresholds = config.thresholds(ModuleName::Docking)?;
    Ok(RuleOutcome::scored(score_docking(&bundle.docking, &thresholds)))
}

fn adme_pk_rule(
    bundle: &ModuleOutputBundle,
    config: &ScoringConfig,
) -> Result<RuleOutcome, ScoringError> {
    let thresholds = config.thresholds(ModuleName::AdmePk)?;
    Ok(RuleOutcome::scored(score_adme_pk(&bundle.adme_pk, &thresholds)))
}

fn toxicity_rule(
    bundle: &ModuleOutputBundle,
    config: &ScoringConfig,
) -> Result<RuleOutcome, ScoringError> {
    let thresholds = config.thresholds(ModuleName::Toxicity)?;
    Ok(score_toxicity(&bundle.toxicity, &thresholds))
}

fn druggability_rule(
    bundle: &ModuleOutputBundle,
    config: &ScoringConfig,
) -> Result<RuleOutcome, ScoringError> {
    let thresholds = config.thresholds(ModuleName::Druggability)?;
    Ok(RuleOutcome::scored(score_druggability(
        &bundle.druggability,
        &thresholds,
    )))
}

fn drug_likeness_rule(
    bundle: &ModuleOutputBundle,
    config: &ScoringConfig,
) -> Result<RuleOutcome, ScoringError> {
    let thresholds = config.thresholds(ModuleName::DrugLikeness)?;
    Ok(RuleOutcome::scored(score_drug_likeness(
        &bundle.drug_likeness,
        &thresholds,
    )))
}

fn off_target_rule(
    bundle: &ModuleOutputBundle,
    config: &ScoringConfig,
) -> Result<RuleOutcome, ScoringError> {
    let thresholds = config.thresholds(ModuleName::OffTarget)?;
    Ok(RuleOutcome::scored(score_off_target(
        &bundle.off_target,
        &thresholds,
    )))
}

const TOXICITY_CLEAN_SCORE: i32 = 20;
const TOXICITY_SINGLE_FLAG_SCORE: i32 = 10;
const HIGH_RISK_MODEL_PENALTY: i32 = 10;

pub(crate) fn score_docking(output: &DockingOutput, thresholds: &DockingThresholds) -> i32 {
    let affinity = output.affinity_kcal;
    let mut score = if affinity < thresholds.affinity.high {
        25
    } else if affinity < thresholds.affinity.medium {
        20
    } else if affinity < thresholds.affinity.low {
        10
    } else {
        0
    };

    if output.rmsd > thresholds.rmsd_max
        || output.num_converged_poses < f64::from(thresholds.min_poses)
    {
        score -= 5;
    }

    score.max(0)
}

pub(crate) fn score_adme_pk(output: &AdmePkOutput, thresholds: &AdmePkThresholds) -> i32 {
    let mut score: i32 = 0;

    let [logp_low, logp_high] = thresholds.logp_range;
    if (logp_low..=logp_high).contains(&output.logp) {
        score += 5;
    }

    if output.hia.to_lowercase() == "high" {
        score += 5;
    }

    if output.half_life_hr > thresholds.half_life_min {
        score += 5;
    }

    let clearance = output.clearance.to_lowercase();
    if thresholds
        .clearance_acceptable
        .iter()
        .any(|acceptable| acceptable.to_lowercase() == clearance)
    {
        score += 5;
    }

    if output.cyp_inhibition {
        score = score.saturating_add(thresholds.cyp_inhibition_penalty);
    }

    score.max(0)
}

/// Flag counts between 2 and `max_flags_allowed` (inclusive) earn nothing and
/// raise no override. So do negative or fractional counts at or below the maximum.
pub(crate) fn score_toxicity(
    output: &ToxicityOutput,
    thresholds: &ToxicityThresholds,
) -> RuleOutcome {
    let max_flags = thresholds.max_flags_allowed;
    let flagged = output.num_models_flagged;
    let (mut score, mut reason) = if flagged == 0.0 {
        (TOXICITY_CLEAN_SCORE, None)
    } else if flagged == 1.0 {
        (TOXICITY_SINGLE_FLAG_SCORE, None)
    } else if flagged > f64::from(max_flags) {
        (0, Some(format!(">{max_flags} toxicity models flagged")))
    } else {
        (0, None)
    };

    let high_risk: Vec<&str> = output
        .high_risk_models
        .iter()
        .filter(|model| thresholds.override_models.contains(*model))
        .map(String::as_str)
        .collect();

    if !high_risk.is_empty() {
        let penalty = i32::try_from(high_risk.len())
            .unwrap_or(i32::MAX)
            .saturating_mul(HIGH_RISK_MODEL_PENALTY);
        score = score.saturating_sub(penalty);

        let penalty_reason = format!("High-risk models flagged: {}", high_risk.join(", "));
        reason = Some(match reason {
            Some(base) => format!("{base}; {penalty_reason}"),
            None => penalty_reason,
        });
    }

    RuleOutcome {
        score: score.max(0),
        override_reason: reason,
    }
}

pub(crate) fn score_druggability(
    output: &DruggabilityOutput,
    thresholds: &DruggabilityThresholds,
) -> i32 {
    let mut score: i32 = if output.pocket_score > thresholds.high_score {
        10
    } else if output.pocket_score >= thresholds.mid_score {
        5
    } else {
        0
    };

    if output.volume >= thresholds.bonus_volume_min
        && output.hydrophobicity >= thresholds.bonus_hydrophobicity_min
    {
        score = score.saturating_add(thresholds.volume_hydrophobicity_bonus);
    }

    score.max(0)
}

/// Violation counts past the largest table key score as that key. Counts that
/// are negative or fractional after clamping match no entry and score 0.
pub(crate) fn score_drug_likeness(
    output: &DrugLikenessOutput,
    thresholds: &DrugLikenessThresholds,
) -> i32 {
    let table = &thresholds.score_by_violations;
    let Some(&worst) = table.keys().next_back() else {
        return 0;
    };

    let violations = output.num_violations.min(f64::from(worst));
    if violations < 0.0 || violations.fract() != 0.0 {
        return 0;
    }

    // Integral and within 0..=worst, so the cast is exact.
    let key = violations as u32;
    table.get(&key).copied().unwrap_or(0).max(0)
}

pub(crate) fn score_off_target(output: &OffTargetOutput, thresholds: &OffTargetThresholds) -> i32 {
    let si = output.selectivity_index;
    let [t0, t1, t2] = thresholds.si_thresholds;
    let mut score: i32 = if si > t2 {
        15
    } else if si > t1 {
        10
    } else if si > t0 {
        5
    } else {
        0
    };

    if output.num_off_targets < f64::from(thresholds.low_target_bonus_threshold) {
        score = score.saturating_add(thresholds.low_target_bonus);
    }

    score.max(0)
}
