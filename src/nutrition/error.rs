use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("{0}")]
    Configuration(String),

    #[error("nutrition provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("nutrition provider responded with {status}")]
    Status {
        status: StatusCode,
        details: serde_json::Value,
    },

    #[error("nutrition provider returned malformed JSON: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

impl AnalyzerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Status { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Status { details, .. } => Some(details.clone()),
            _ => None,
        }
    }
}
