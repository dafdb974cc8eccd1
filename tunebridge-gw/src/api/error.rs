//! HTTP-facing error types producing the uniform envelope
//!
//! Upstream detail is logged at the operation boundary before one of these
//! is returned; only the generic operation message leaves the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tunebridge_common::api::Envelope;

/// Request failures mapped to envelope responses
#[derive(Debug)]
pub enum ApiError {
    /// Callback arrived without an authorization code (400)
    MissingCode,
    /// A playback endpoint was called before any login completed (401)
    Unauthenticated,
    /// The remote service failed; carries the operation-specific generic
    /// message shown to the caller (500)
    Upstream(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingCode => (StatusCode::BAD_REQUEST, "No code provided"),
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, "Please log in first."),
            ApiError::Upstream(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(Envelope::fail(message))).into_response()
    }
}

/// Fallback handler for unmatched paths, any method
pub async fn not_found() -> (StatusCode, Json<Envelope>) {
    (StatusCode::NOT_FOUND, Json(Envelope::fail("Not Found")))
}
