use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mediagen_core::MediagenError;
use serde_json::json;

/// HTTP-facing error wrapper. Client mistakes surface with their message,
/// everything else is logged and returned opaque.
pub struct ApiError(MediagenError);

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self(MediagenError::RemoteInvocation(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<MediagenError> for ApiError {
    fn from(err: MediagenError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status == StatusCode::BAD_REQUEST {
            self.0.to_string()
        } else {
            tracing::error!(error = %self.0, "request failed");
            "Internal server error".to_string()
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Plain 404 for lookups of unknown media ids
pub struct NotFound(pub String);

impl IntoResponse for NotFound {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": format!("Media '{}' not found", self.0) })),
        )
            .into_response()
    }
}
