use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Error response in the service's wire shape: `(status, {"message": ...})`.
///
/// The message texts are part of the external contract and are produced
/// verbatim by the route handlers; nothing here rewrites them.
#[derive(Debug)]
pub struct JsonMessage {
    pub status: StatusCode,
    pub message: String,
}

impl JsonMessage {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl IntoResponse for JsonMessage {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"message": self.message}))).into_response()
    }
}
