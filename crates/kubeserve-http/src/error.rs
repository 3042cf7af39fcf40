use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kubeserve_types::ResourceKind;
use thiserror::Error;
use tracing::warn;

/// Errors a handler can answer with
///
/// Both variants are written back as `text/plain` bodies.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing required query parameter 'id'")]
    MissingDeploymentId,

    #[error("Error getting {kind}: {message}")]
    Upstream { kind: ResourceKind, message: String },
}

impl ApiError {
    /// Wrap a failed list call, keeping the full upstream error chain
    pub fn upstream(kind: ResourceKind, err: anyhow::Error) -> Self {
        let message = format!("{:#}", err);
        warn!(kind = %kind, error = %message, "cluster list call failed");
        Self::Upstream { kind, message }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingDeploymentId => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
