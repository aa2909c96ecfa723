use super::module::ModuleName;

/// Raised while loading a scoring configuration, before any request is served.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file not found: {path}")]
    NotFound { path: String },
    #[error("failed to read configuration {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML format in configuration {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("configuration file is empty or invalid: {path}")]
    Empty { path: String },
    #[error("configuration {path} must be a mapping at the top level")]
    NotAMapping { path: String },
    #[error("missing required config section: {0}")]
    MissingSection(&'static str),
    #[error("config section `{0}` must be a mapping keyed by module name")]
    InvalidSection(&'static str),
    #[error("missing weight for module: {0}")]
    MissingWeight(ModuleName),
    #[error("missing thresholds for module: {0}")]
    MissingThresholds(ModuleName),
}

/// Raised at the start of a scoring call when the request is malformed.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input must be a mapping of module outputs")]
    NotAMapping,
    #[error("input mapping cannot be empty")]
    Empty,
    #[error("missing required modules: {}", join_modules(.0))]
    MissingModules(Vec<ModuleName>),
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("thresholds for module {module} do not match the expected shape: {source}")]
    Thresholds {
        module: ModuleName,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("output record for module {module} is malformed: {source}")]
    Record {
        module: ModuleName,
        #[source]
        source: serde_json::Error,
    },
}

fn join_modules(modules: &[ModuleName]) -> String {
    modules
        .iter()
        .map(|module| module.key())
        .collect::<Vec<_>>()
        .join(", ")
}
