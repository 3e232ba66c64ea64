//! HTTP error response handling for the API
//!
//! This module provides conversions from domain errors to HTTP responses
//! with appropriate status codes and JSON error bodies.

use crate::error::{ApiError, Error, ToHttpStatus};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Implement IntoResponse for Error to automatically convert errors to HTTP responses
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let api_error: ApiError = self.into();

        (status_code, Json(api_error)).into_response()
    }
}

/// Implement IntoResponse for ApiError for explicit error responses
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Default to 500 if we're directly converting an ApiError
        // (usually errors go through Error::into_response which has the status code)
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;

    async fn body_of(response: Response) -> ApiError {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_missing_url_into_response() {
        let response = Error::MissingUrl.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let api_error = body_of(response).await;
        assert_eq!(api_error.error.code, "missing_url");
        assert!(api_error.error.details.is_none());
    }

    #[tokio::test]
    async fn test_empty_result_into_response() {
        let response = Error::EmptyResult {
            url: "https://example.com/v/1".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let api_error = body_of(response).await;
        assert_eq!(api_error.error.code, "empty_result");
        assert_eq!(
            api_error.error.details.unwrap()["url"],
            "https://example.com/v/1"
        );
    }

    #[tokio::test]
    async fn test_extraction_error_into_response() {
        let response = Error::Extraction {
            stage: Stage::Download,
            message: "ERROR: HTTP Error 403: Forbidden".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let api_error = body_of(response).await;
        assert_eq!(api_error.error.code, "extraction_failed");
        assert_eq!(
            api_error.error.message,
            "download failed: ERROR: HTTP Error 403: Forbidden"
        );
        assert_eq!(api_error.error.details.unwrap()["stage"], "download");
    }

    #[tokio::test]
    async fn test_timeout_into_response() {
        let response = Error::Timeout {
            stage: Stage::Metadata,
            timeout_ms: 30_000,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let details = body_of(response).await.error.details.unwrap();
        assert_eq!(details["stage"], "metadata");
        assert_eq!(details["timeout_ms"], 30_000);
    }

    #[tokio::test]
    async fn test_api_error_into_response_defaults_to_500() {
        let response = ApiError::internal("response build failed").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await.error.code, "internal_error");
    }
}
