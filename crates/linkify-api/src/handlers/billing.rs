//! Billing handlers
//!
//! Checkout and portal links, subscription status and the LemonSqueezy webhook.

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use linkify_common::SIGNATURE_HEADER;
use linkify_service::dto::{SubscriptionResponse, UrlResponse};
use linkify_service::services::{BillingService, WebhookOutcome};
use serde::Serialize;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Acknowledgement returned to the billing provider
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
}

impl From<WebhookOutcome> for WebhookAck {
    fn from(outcome: WebhookOutcome) -> Self {
        let status = match outcome {
            WebhookOutcome::Applied(_) => "applied",
            WebhookOutcome::Ignored => "ignored",
        };
        Self { status }
    }
}

/// POST /billing/checkout
pub async fn create_checkout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UrlResponse>> {
    let service = BillingService::new(state.service_context());
    let url = service.create_checkout(auth.user_id).await?;
    Ok(Json(url))
}

/// GET /billing/subscription
pub async fn get_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<SubscriptionResponse>> {
    let service = BillingService::new(state.service_context());
    let subscription = service.subscription_status(auth.user_id).await?;
    Ok(Json(subscription))
}

/// GET /billing/portal
pub async fn get_portal(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UrlResponse>> {
    let service = BillingService::new(state.service_context());
    let url = service.customer_portal(auth.user_id).await?;
    Ok(Json(url))
}

/// Subscription lifecycle events, signed over the raw body
///
/// POST /api/webhook
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<WebhookAck>> {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());

    let service = BillingService::new(state.service_context());
    let outcome = service.apply_webhook(&body, signature).await?;
    Ok(Json(outcome.into()))
}
