use crate::config::AppConfigError;
use crate::scoring::{ConfigError, ScoringError};
use crate::telemetry::TelemetryError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(AppConfigError),
    ScoringConfig(ConfigError),
    Scoring(ScoringError),
    Payload(JsonRejection),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Server(axum::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Scoring(ScoringError::Input(_)) | AppError::Payload(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Scoring(ScoringError::Record { .. } | ScoringError::Thresholds { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Scoring(ScoringError::Config(_))
            | AppError::Config(_)
            | AppError::ScoringConfig(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Json(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::ScoringConfig(err) => write!(f, "scoring configuration error: {}", err),
            AppError::Scoring(err) => write!(f, "scoring error: {}", err),
            AppError::Payload(err) => write!(f, "invalid request body: {}", err.body_text()),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "json error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::ScoringConfig(err) => Some(err),
            AppError::Scoring(err) => Some(err),
            AppError::Payload(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Server(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<AppConfigError> for AppError {
    fn from(value: AppConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::ScoringConfig(value)
    }
}

impl From<ScoringError> for AppError {
    fn from(value: ScoringError) -> Self {
        Self::Scoring(value)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::Payload(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}
