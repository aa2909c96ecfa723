use std::path::Path;

use tracing::{debug, info, warn};

use super::module::ModuleName;
use super::policy::GoDecision;

/// Structured events emitted while loading configuration and scoring a compound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreEvent<'a> {
    ConfigLoaded { path: &'a Path },
    AggregationStarted,
    ModuleScored { module: ModuleName, score: i32 },
    OverrideTriggered { module: ModuleName, reason: &'a str },
    AggregationCompleted { svs_score: u8, decision: GoDecision },
}

/// Sink injected into the aggregator so that scoring never touches global state.
pub trait ScoreObserver: Send + Sync {
    fn record(&self, event: &ScoreEvent<'_>);
}

/// Forwards events to `tracing`; output depends on whichever subscriber the
/// binary installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScoreObserver for TracingObserver {
    fn record(&self, event: &ScoreEvent<'_>) {
        match *event {
            ScoreEvent::ConfigLoaded { path } => {
                info!(path = %path.display(), "scoring configuration loaded");
            }
            ScoreEvent::AggregationStarted => debug!("aggregating module scores for compound"),
            ScoreEvent::ModuleScored { module, score } => {
                debug!(module = module.key(), score, "module scored");
            }
            ScoreEvent::OverrideTriggered { module, reason } => {
                warn!(module = module.key(), reason, "override triggered");
            }
            ScoreEvent::AggregationCompleted {
                svs_score,
                decision,
            } => {
                info!(svs_score, decision = decision.label(), "compound scored");
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScoreObserver for NoopObserver {
    fn record(&self, _event: &ScoreEvent<'_>) {}
}
