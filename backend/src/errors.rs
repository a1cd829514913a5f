use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use crowdfund_zk::{ErrorKind, ZkError};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// Prover output disagrees with the request's donor data.
    #[error("{0}")]
    Consistency(String),

    #[error("{0}")]
    ExternalTool(String),

    #[error("internal error")]
    Internal,
}

impl From<ZkError> for ApiError {
    fn from(e: ZkError) -> Self {
        let msg = e.to_string();
        match e.kind() {
            ErrorKind::Validation => ApiError::BadRequest(msg),
            ErrorKind::Consistency => ApiError::Consistency(msg),
            ErrorKind::ExternalTool => ApiError::ExternalTool(msg),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Consistency(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ExternalTool(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// Fatal conditions that keep the server from accepting traffic.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("missing {label} at {}", path.display())]
    MissingArtifact { label: &'static str, path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("invalid verification key: {0}")]
    InvalidVerificationKey(String),

    #[error("failed to initialize poseidon: {0}")]
    Hasher(String),

    #[error("failed to bind listener: {0}")]
    Bind(std::io::Error),

    #[error("server error: {0}")]
    Serve(std::io::Error),

    #[error("startup task failed")]
    Join,
}
