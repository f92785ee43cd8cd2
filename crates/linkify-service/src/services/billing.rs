//! Billing service - checkout, subscription state and provider webhooks

use chrono::Utc;
use linkify_common::verify_signature;
use linkify_core::entities::plan_for;
use linkify_core::error::DomainError;
use linkify_core::traits::CheckoutRequest;
use linkify_core::Snowflake;
use linkify_integrations::{WebhookEvent, WebhookEventKind};
use tracing::{info, instrument, warn};

use crate::dto::{SubscriptionResponse, UrlResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::profile::ProfileService;

/// What a verified webhook did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A subscription row was written for this user
    Applied(Snowflake),
    /// Valid event of a kind we do not track
    Ignored,
}

pub struct BillingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BillingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start a hosted checkout for the Pro plan
    #[instrument(skip(self))]
    pub async fn create_checkout(&self, user_id: Snowflake) -> ServiceResult<UrlResponse> {
        let user = ProfileService::new(self.ctx).load_user(user_id).await?;

        let request = CheckoutRequest {
            user_id,
            email: user.email.clone(),
            name: user.display_name().to_string(),
            redirect_url: format!(
                "{}/dashboard/billing",
                self.ctx.settings().public_base_url.trim_end_matches('/')
            ),
        };
        let url = self.ctx.billing().create_checkout(&request).await?;

        info!(user_id = %user_id, "Checkout created");

        Ok(UrlResponse { url })
    }

    #[instrument(skip(self))]
    pub async fn subscription_status(&self, user_id: Snowflake) -> ServiceResult<SubscriptionResponse> {
        let subscription = self.ctx.subscription_repo().find_by_user(user_id).await?;
        let plan = plan_for(subscription.as_ref(), Utc::now());

        Ok(SubscriptionResponse {
            plan,
            status: subscription.as_ref().map(|s| s.status),
            renews_at: subscription.as_ref().and_then(|s| s.renews_at),
            ends_at: subscription.as_ref().and_then(|s| s.ends_at),
            entitlements: plan.entitlements(),
        })
    }

    /// Link to the provider's self-service portal
    #[instrument(skip(self))]
    pub async fn customer_portal(&self, user_id: Snowflake) -> ServiceResult<UrlResponse> {
        let url = self
            .ctx
            .subscription_repo()
            .find_by_user(user_id)
            .await?
            .and_then(|s| s.customer_portal_url)
            .ok_or(DomainError::SubscriptionNotFound)?;

        Ok(UrlResponse { url })
    }

    /// Verify and apply a billing webhook
    ///
    /// `signature` is the hex HMAC from the signature header. Subscription
    /// created/updated events upsert the user's subscription row; any other
    /// event is acknowledged without changes.
    #[instrument(skip(self, body, signature), fields(len = body.len()))]
    pub async fn apply_webhook(&self, body: &[u8], signature: Option<&str>) -> ServiceResult<WebhookOutcome> {
        verify_signature(&self.ctx.settings().webhook_secret, body, signature).inspect_err(|_| {
            warn!("Rejected webhook with invalid signature");
        })?;

        let event = WebhookEvent::from_slice(body)?;
        if event.kind() == WebhookEventKind::Other {
            info!(event = %event.meta.event_name, "Ignoring webhook event");
            return Ok(WebhookOutcome::Ignored);
        }

        let user_id = event.user_id()?;
        ProfileService::new(self.ctx).load_user(user_id).await?;

        // Keep the row id stable across updates
        let id = match self.ctx.subscription_repo().find_by_user(user_id).await? {
            Some(existing) => existing.id,
            None => self.ctx.generate_id(),
        };
        let subscription = event.to_subscription(id, user_id)?;
        self.ctx.subscription_repo().upsert(&subscription).await?;

        info!(
            user_id = %user_id,
            event = %event.meta.event_name,
            status = subscription.status.as_str(),
            "Subscription updated from webhook"
        );

        Ok(WebhookOutcome::Applied(user_id))
    }
}
