use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// User-facing failure taxonomy carried in snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    ResponseShape,
    Transport,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Validation => "validation",
            FailureKind::ResponseShape => "response_shape",
            FailureKind::Transport => "transport",
        }
    }
}

/// Failure of one outbound generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("response carried no usable candidate")]
    EmptyResponse,
    #[error("generation call aborted: {0}")]
    Aborted(String),
}

impl GenerationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GenerationError::EmptyResponse => FailureKind::ResponseShape,
            _ => FailureKind::Transport,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("feature {feature}: field {field} never appears in the prompt template")]
    UnusedField { feature: String, field: String },
    #[error("feature {feature}: placeholder {{{placeholder}}} names no field")]
    UnknownPlaceholder { feature: String, placeholder: String },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown generator: {0}")]
    UnknownFeature(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnknownFeature(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
