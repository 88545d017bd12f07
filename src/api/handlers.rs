//! HTTP request handlers

use super::types::{ErrorResponse, VerifyQuery, VersionResponse};
use super::webhook::WebhookPayload;
use super::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Subscription handshake and message delivery
        .route("/webhook", get(verify_webhook).post(receive_webhook))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Webhook
// ============================================================

async fn verify_webhook(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Result<String, AppError> {
    let subscribing = query.mode.as_deref() == Some("subscribe");
    let token_matches = query.verify_token.as_deref() == Some(&*state.verify_token);

    if subscribing && token_matches {
        tracing::info!("Webhook verified");
        Ok(query.challenge.unwrap_or_default())
    } else {
        tracing::warn!(mode = ?query.mode, "Webhook verification rejected");
        Err(AppError::Forbidden("Forbidden".to_string()))
    }
}

/// Always answers 200 so the platform never redelivers a payload we cannot use
async fn receive_webhook(State(state): State<AppState>, body: Bytes) -> (StatusCode, &'static str) {
    let messages = WebhookPayload::parse(&body)
        .map(WebhookPayload::into_messages)
        .unwrap_or_default();

    if messages.is_empty() {
        tracing::debug!(bytes = body.len(), "Webhook delivery without user messages");
        return (StatusCode::OK, "No message");
    }

    for message in messages {
        let user_id = message.user_id.clone();
        if let Err(e) = state.runtime.handle(message).await {
            tracing::error!(user_id = %user_id, error = %e, "Failed to apply order transition");
        }
    }

    (StatusCode::OK, "OK")
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    Forbidden(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
