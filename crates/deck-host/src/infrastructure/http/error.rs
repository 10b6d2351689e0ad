//! The HTTP error shape: every fault is `{"detail": <message>}` with a 400
//! or 500 status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use deck_core::DispatchError;
use serde_json::json;
use tracing::error;

use crate::application::actuate::ActuationError;

/// A fault serialized as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// A 400 with the given detail message.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    /// A 500 with the given detail message.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<DispatchError> for ApiError {
    /// Validation faults map to 400, actuation faults to 500.  Server-side
    /// faults are logged here, at the boundary where they leave the process.
    fn from(e: DispatchError) -> Self {
        if e.is_client_error() {
            Self::bad_request(e.to_string())
        } else {
            error!("command execution failed: {e}");
            Self::internal(e.to_string())
        }
    }
}

impl From<ActuationError> for ApiError {
    fn from(e: ActuationError) -> Self {
        error!("actuation failed: {e}");
        Self::internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_faults_are_client_errors() {
        let e = ApiError::from(DispatchError::UnknownCommandType("warp".into()));
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_actuation_faults_are_server_errors() {
        let e = ApiError::from(DispatchError::Actuation("backend down".into()));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
