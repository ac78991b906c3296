//! Request failures that are not "no data".

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::format::EncodeError;
use crate::snapshot::SnapshotError;

/// Errors that end a request with a 5xx status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The snapshot files are missing, malformed, or not loaded yet.
    #[error("monitoring data unavailable: {0}")]
    SourceUnavailable(#[from] SnapshotError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::SourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        (status, self.to_string()).into_response()
    }
}
