use clap::Args;
use meta_scorer::config::AppConfig;
use meta_scorer::error::AppError;
use meta_scorer::scoring::{AggregationResult, ModuleName, ScoringAggregator, TracingObserver};
use meta_scorer::telemetry;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Module outputs to score (JSON object keyed by module name)
    #[arg(long, default_value = "demos/input_example.json")]
    pub(crate) input: PathBuf,
    /// Where the scoring result is written
    #[arg(long, default_value = "demos/output_example.json")]
    pub(crate) output: PathBuf,
    /// Scoring configuration (defaults to META_SCORER_CONFIG, then config/score_config.yaml)
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Print the result without writing it to disk
    #[arg(long)]
    pub(crate) no_save: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ConfigCheckArgs {
    /// Scoring configuration (defaults to META_SCORER_CONFIG, then config/score_config.yaml)
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        output,
        config,
        no_save,
    } = args;

    let app_config = AppConfig::load()?;
    telemetry::init(&app_config.telemetry)?;

    let config_path = config.unwrap_or(app_config.scoring.config_path);
    let aggregator = ScoringAggregator::from_path(&config_path, Arc::new(TracingObserver))?;

    let request = read_request(&input)?;
    let result = aggregator.aggregate(&request)?;
    let rendered = serde_json::to_string_pretty(&result)?;

    for line in summary_lines(&result) {
        println!("{line}");
    }
    println!("\nScoring result:");
    println!("{rendered}");

    if !no_save {
        persist(&output, &rendered)?;
        println!("\nOutput saved to: {}", output.display());
    }

    Ok(())
}

pub(crate) fn run_config_check(args: ConfigCheckArgs) -> Result<(), AppError> {
    let app_config = AppConfig::load()?;
    let config_path = args.config.unwrap_or(app_config.scoring.config_path);

    let aggregator = ScoringAggregator::from_path(&config_path, Arc::new(TracingObserver))?;

    println!("Configuration OK: {}", config_path.display());
    for module in ModuleName::ordered() {
        match aggregator.config().weight(module) {
            Some(weight) => println!("- {}: weight {}", module.label(), weight),
            None => println!("- {}: weight (non-numeric)", module.label()),
        }
    }

    Ok(())
}

fn read_request(path: &Path) -> Result<Value, AppError> {
    if !path.exists() {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("cannot find input file: {}", path.display()),
        )));
    }

    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn persist(path: &Path, rendered: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{rendered}\n"))?;
    Ok(())
}

pub(crate) fn summary_lines(result: &AggregationResult) -> Vec<String> {
    let mut lines = vec![format!(
        "Suitability score: {} ({})",
        result.svs_score, result.go_decision
    )];

    for (module, score) in result.score_breakdown.iter() {
        lines.push(format!("- {}: {}", module.label(), score));
    }

    if !result.failure_rationale.is_empty() {
        lines.push("Overrides:".to_string());
        for reason in &result.failure_rationale {
            lines.push(format!("- {reason}"));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use meta_scorer::scoring::{NoopObserver, ScoringAggregator};

    fn shipped_aggregator() -> ScoringAggregator {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/score_config.yaml");
        ScoringAggregator::from_path(path, Arc::new(NoopObserver)).expect("config loads")
    }

    fn demo_input() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/input_example.json")
    }

    #[test]
    fn reads_and_scores_the_demo_request() {
        let request = read_request(&demo_input()).expect("demo request reads");
        let result = shipped_aggregator()
            .aggregate(&request)
            .expect("demo request scores");

        let lines = summary_lines(&result);
        assert_eq!(lines[0], "Suitability score: 80 (go)");
        assert!(lines.contains(&"- Docking: 20".to_string()));
        assert!(!lines.iter().any(|line| line == "Overrides:"));
    }

    #[test]
    fn missing_input_names_the_file() {
        let err = read_request(Path::new("nowhere/input.json")).expect_err("missing input");
        assert!(err.to_string().contains("cannot find input file: nowhere/input.json"));
    }

    #[test]
    fn persist_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("output.json");

        persist(&path, "{}").expect("result persisted");

        let written = fs::read_to_string(&path).expect("output readable");
        assert_eq!(written, "{}\n");
    }
}
