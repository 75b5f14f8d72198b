//! API error handling.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use webring_core::error::WebringError;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error type, rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Internal server error. The caller never sees the cause.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }

    /// HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message sent to the client.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<WebringError> for ApiError {
    fn from(err: WebringError) -> Self {
        match &err {
            WebringError::MissingParameter(_) => ApiError::bad_request(err.to_string()),
            WebringError::NoUrlsAvailable => ApiError::not_found(err.to_string()),
            _ => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal()
            }
        }
    }
}

/// Turns a handler panic into the generic 500 body.
pub(crate) fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = detail, "Handler panicked");

    ApiError::internal().into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_error_mapping() {
        let err = ApiError::from(WebringError::MissingParameter("current".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Missing required parameter: current");

        let err = ApiError::from(WebringError::NoUrlsAvailable);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "No webring URLs available");
    }

    #[test]
    fn test_internal_errors_are_opaque() {
        let err = ApiError::from(WebringError::ConfigError("GOOGLE_API_KEY=secret".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Internal server error");
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::not_found("Picture not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Picture not found" })
        );
    }

    #[tokio::test]
    async fn test_panic_response() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Internal server error" })
        );
    }
}
