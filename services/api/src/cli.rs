use crate::harness::{run_config_check, run_score, ConfigCheckArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use meta_scorer::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Meta Scorer",
    about = "Score drug candidate compounds from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a module output file and persist the result
    Score(ScoreArgs),
    /// Load and validate a scoring configuration
    CheckConfig(ConfigCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the scoring configuration file
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::CheckConfig(args) => run_config_check(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["meta-scorer-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_uses_demo_paths_by_default() {
        let cli = Cli::try_parse_from(["meta-scorer-api", "score"]).expect("parses");
        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.input, PathBuf::from("demos/input_example.json"));
                assert_eq!(args.output, PathBuf::from("demos/output_example.json"));
                assert!(args.config.is_none());
                assert!(!args.no_save);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "meta-scorer-api",
            "serve",
            "--port",
            "8080",
            "--config",
            "alt.yaml",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.config, Some(PathBuf::from("alt.yaml")));
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}
