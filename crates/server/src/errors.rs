use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Error response with a fixed, client-safe message: `{"error": "..."}`.
///
/// Underlying causes are logged where they happen and never copied here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    pub fn bad_request(message: &'static str) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }

    pub fn not_found() -> Self { Self::new(StatusCode::NOT_FOUND, "subscription not found") }

    pub fn internal(message: &'static str) -> Self { Self::new(StatusCode::INTERNAL_SERVER_ERROR, message) }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}
