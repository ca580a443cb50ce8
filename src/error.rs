//! Error handling module
//!
//! Provides unified error types and handling for the entire application.

use crate::enquiry::DeliveryReport;
use crate::mail::MailError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Shown to the user whenever an enquiry could not be relayed.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to send message. Please try again or call us directly.";

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Dispatch error: {source}")]
    Dispatch {
        #[source]
        source: MailError,
        delivery: DeliveryReport,
        expose_details: bool,
    },
}

/// Error response structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryReport>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details, delivery) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
                None,
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                msg.clone(),
                None,
                None,
            ),
            AppError::Dispatch {
                source,
                delivery,
                expose_details,
            } => {
                error!("Dispatch error: {} ({:?})", source, delivery);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DISPATCH_ERROR",
                    GENERIC_FAILURE_MESSAGE.to_string(),
                    expose_details.then(|| source.to_string()),
                    Some(*delivery),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error: message,
            code: Some(error_code.to_string()),
            details,
            delivery,
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper function to create a validation error
pub fn validation_error(msg: impl Into<String>) -> AppError {
    AppError::Validation(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enquiry::DeliveryStatus;
    use http_body_util::BodyExt;

    async fn body_of(err: AppError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn dispatch_error(expose_details: bool) -> AppError {
        AppError::Dispatch {
            source: MailError::Smtp("535 authentication failed".to_string()),
            delivery: DeliveryReport {
                admin_notification: DeliveryStatus::Failed,
                acknowledgement: DeliveryStatus::Skipped,
            },
            expose_details,
        }
    }

    #[tokio::test]
    async fn test_validation_error_is_400_with_message() {
        let (status, body) = body_of(validation_error("Invalid email format")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert_eq!(body.error, "Invalid email format");
        assert_eq!(body.details, None);
    }

    #[tokio::test]
    async fn test_dispatch_error_hides_details_in_production() {
        let (status, body) = body_of(dispatch_error(false)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, GENERIC_FAILURE_MESSAGE);
        assert_eq!(body.details, None);
        assert_eq!(body.delivery.map(|d| d.admin_notification), Some(DeliveryStatus::Failed));
    }

    #[tokio::test]
    async fn test_dispatch_error_exposes_details_when_allowed() {
        let (_, body) = body_of(dispatch_error(true)).await;
        assert_eq!(body.details.as_deref(), Some("SMTP error: 535 authentication failed"));
    }
}
