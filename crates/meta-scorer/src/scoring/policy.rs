use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum suitability score a compound needs to advance.
pub const GO_THRESHOLD: u8 = 70;
pub const SVS_MAX: u8 = 100;

/// Binary triage outcome gating downstream advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoDecision {
    #[serde(rename = "go")]
    Go,
    #[serde(rename = "no-go")]
    NoGo,
}

impl GoDecision {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::NoGo => "no-go",
        }
    }
}

impl fmt::Display for GoDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clamp a raw module sum into the suitability score range.
pub fn clamp_svs(total: i64) -> u8 {
    let clamped = total.clamp(0, i64::from(SVS_MAX));
    u8::try_from(clamped).unwrap_or(SVS_MAX)
}

/// Any override reason forces a no-go regardless of the score.
pub(crate) fn decide_outcome(svs_score: u8, failure_rationale: &[String]) -> GoDecision {
    if svs_score >= GO_THRESHOLD && failure_rationale.is_empty() {
        GoDecision::Go
    } else {
        GoDecision::NoGo
    }
}
