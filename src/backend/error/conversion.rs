/**
 * Error Conversion
 *
 * This module provides conversion implementations for backend errors,
 * allowing them to be returned directly from Axum handlers.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 *
 * Validation errors additionally carry the offending field name:
 * ```json
 * {
 *   "error": "Invalid email format",
 *   "field": "email",
 *   "status": 400
 * }
 * ```
 */

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::backend::error::types::ApiError;

impl IntoResponse for ApiError {
    /// Convert a backend error into an HTTP response
    ///
    /// Infrastructure failures are logged here with their full cause; the
    /// client only ever sees the generic message from `ApiError::message`.
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
            }
            ApiError::Internal(cause) => {
                tracing::error!("Internal error: {}", cause);
            }
            _ => {}
        }

        let status = self.status_code();
        let message = self.message();

        let mut body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });
        if let Some(field) = self.field() {
            body["field"] = serde_json::Value::String(field.to_string());
        }

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap_or_else(
                |_| format!(r#"{{"error":"{}","status":{}}}"#, message, status.as_u16()),
            )))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::from("Internal Server Error"))
                    .unwrap()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status() {
        let response = ApiError::DuplicateIdentity.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_error_response_content_type() {
        let response = ApiError::AuthFailure.into_response();
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_error_response_body_shape() {
        let response = ApiError::invalid_input("email", "Invalid email format").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Invalid email format");
        assert_eq!(body["field"], "email");
        assert_eq!(body["status"], 400);
    }
}
