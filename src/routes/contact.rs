//! Contact form route handlers
//!
//! POST /api/contact relays a website enquiry by email.

use crate::enquiry::SUCCESS_MESSAGE;
use crate::error::{ApiResult, AppError};
use crate::models::{EnquiryRequest, MessageResponse};
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::warn;

/// Submit an enquiry
///
/// Returns 400 for missing or malformed fields, 500 when either email
/// could not be dispatched.
pub async fn submit_enquiry(
    State(state): State<SharedState>,
    payload: Result<Json<EnquiryRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected enquiry body: {}", rejection.body_text());
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    state.enquiries.submit(request).await?;

    Ok(Json(MessageResponse::new(SUCCESS_MESSAGE)))
}

#[cfg(test)]
mod tests {
    use crate::config::{AppEnvironment, Settings};
    use crate::enquiry::{DeliveryStatus, SUCCESS_MESSAGE};
    use crate::error::{ErrorResponse, GENERIC_FAILURE_MESSAGE};
    use crate::mail::memory::{Behaviour, MemoryTransport};
    use crate::models::MessageResponse;
    use crate::routes::create_router;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    const ADMIN: &str = "admin@sljsolutions.com";

    fn app_with(transport: Arc<MemoryTransport>, environment: AppEnvironment) -> Router {
        let mut settings = Settings::default();
        settings.mail.admin_email = ADMIN.to_string();
        settings.environment = environment;
        let state = Arc::new(AppState::new(transport, &settings));
        create_router(state, &settings)
    }

    fn app(transport: Arc<MemoryTransport>) -> Router {
        app_with(transport, AppEnvironment::Production)
    }

    fn post_json(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send<T: DeserializeOwned>(app: Router, request: Request<Body>) -> (StatusCode, T) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_valid_enquiry_returns_success() {
        let transport = Arc::new(MemoryTransport::new());
        let (status, body): (_, MessageResponse) = send(
            app(transport.clone()),
            post_json(json!({
                "name": "Asha",
                "email": "asha@example.com",
                "phone": "+91 98100 00000",
                "message": "Need a kitchen redesign"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, MessageResponse::new(SUCCESS_MESSAGE));

        let sent = transport.attempts();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, ADMIN);
        assert_eq!(sent[1].to, "asha@example.com");
    }

    #[tokio::test]
    async fn test_missing_required_fields_return_400() {
        for payload in [
            json!({}),
            json!({ "email": "asha@example.com" }),
            json!({ "name": "Asha" }),
            json!({ "name": "", "email": "" }),
        ] {
            let transport = Arc::new(MemoryTransport::new());
            let (status, body): (_, ErrorResponse) = send(app(transport.clone()), post_json(payload.clone())).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
            assert!(body.error.ends_with("required"), "payload {} gave {:?}", payload, body.error);
            assert!(transport.attempts().is_empty());
        }
    }

    #[tokio::test]
    async fn test_invalid_email_returns_400() {
        for email in ["nope", "a@b", "a@b.c "] {
            let transport = Arc::new(MemoryTransport::new());
            let (status, body): (_, ErrorResponse) = send(
                app(transport.clone()),
                post_json(json!({ "name": "Asha", "email": email })),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body.error, "Invalid email format");
            assert!(transport.attempts().is_empty());
        }
    }

    #[tokio::test]
    async fn test_malformed_body_returns_json_400() {
        let transport = Arc::new(MemoryTransport::new());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body): (_, ErrorResponse) = send(app(transport.clone()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Invalid request body");
        assert!(transport.attempts().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let transport = Arc::new(MemoryTransport::new());
        let (status, body): (_, ErrorResponse) = send(
            app(transport.clone()),
            post_json(json!({
                "name": "Asha",
                "email": "asha@example.com",
                "message": "x".repeat(70_000)
            })),
        )
        .await;

        assert!(status.is_client_error(), "got {}", status);
        assert!(!body.success);
        assert_eq!(body.error, "Invalid request body");
        assert!(transport.attempts().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_failure_returns_generic_500() {
        for script in [vec![Behaviour::Fail], vec![Behaviour::Deliver, Behaviour::Fail]] {
            let transport = Arc::new(MemoryTransport::scripted(script));
            let (status, body): (_, ErrorResponse) = send(
                app(transport),
                post_json(json!({ "name": "Asha", "email": "asha@example.com" })),
            )
            .await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(!body.success);
            assert_eq!(body.error, GENERIC_FAILURE_MESSAGE);
            assert_eq!(body.details, None);
        }
    }

    #[tokio::test]
    async fn test_dispatch_failure_details_outside_production() {
        let transport = Arc::new(MemoryTransport::scripted(vec![Behaviour::Deliver, Behaviour::Fail]));
        let (status, body): (_, ErrorResponse) = send(
            app_with(transport, AppEnvironment::Development),
            post_json(json!({ "name": "Asha", "email": "asha@example.com" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.details.as_deref(), Some("SMTP error: connection refused"));

        let delivery = body.delivery.unwrap();
        assert_eq!(delivery.admin_notification, DeliveryStatus::Sent);
        assert_eq!(delivery.acknowledgement, DeliveryStatus::Failed);
    }

    #[tokio::test]
    async fn test_health_check() {
        let transport = Arc::new(MemoryTransport::new());
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body): (_, serde_json::Value) = send(app(transport), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["service"], json!("slj-enquiry-api"));
    }
}
