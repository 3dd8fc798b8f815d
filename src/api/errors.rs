use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::agents::errors::RoutingError;

/// API error type with HTTP status code and message
///
/// `kind` is a stable machine-readable name so clients can tell "no agent
/// available" apart from "agent found but call failed".
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub kind: Option<&'static str>,
    pub data: Option<Value>,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            kind: None,
            data: None,
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_kind(mut self, kind: &'static str) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.message
        });
        if let Some(kind) = self.kind {
            body["kind"] = json!(kind);
        }
        if let Some(data) = self.data {
            body["data"] = data;
        }

        (self.status, Json(body)).into_response()
    }
}

impl From<RoutingError> for ApiError {
    fn from(error: RoutingError) -> Self {
        let status = match &error {
            RoutingError::NoSkillMatch { .. } => StatusCode::NOT_FOUND,
            RoutingError::PreconditionFailed { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RoutingError::FetchFailed { .. }
            | RoutingError::RemoteError(_)
            | RoutingError::Transport(_)
            | RoutingError::MalformedResponse(_)
            | RoutingError::SelectorFailed(_) => StatusCode::BAD_GATEWAY,
            RoutingError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let api_error = ApiError::new(status, error.to_string()).with_kind(error.kind());
        match error {
            RoutingError::RemoteError(remote) => {
                api_error.with_data(serde_json::to_value(remote).unwrap_or(Value::Null))
            }
            _ => api_error,
        }
    }
}
