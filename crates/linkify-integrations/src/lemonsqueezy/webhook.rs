//! LemonSqueezy webhook payload
//!
//! Only the fields the subscription row needs are modelled. Numeric ids are
//! accepted as either JSON numbers or strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use linkify_core::entities::{Subscription, SubscriptionStatus};
use linkify_core::error::DomainError;
use linkify_core::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookEventKind {
    SubscriptionCreated,
    SubscriptionUpdated,
    /// Acknowledged and ignored
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub meta: Meta,
    pub data: Data,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub event_name: String,
    #[serde(default)]
    pub custom_data: Option<CustomData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomData {
    #[serde(default, deserialize_with = "opt_id_string")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Data {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Attributes {
    // Defaults keep non-subscription events (orders, licenses) parseable
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "id_string")]
    pub customer_id: String,
    #[serde(default, deserialize_with = "id_string")]
    pub variant_id: String,
    #[serde(default)]
    pub renews_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub urls: Option<Urls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Urls {
    #[serde(default)]
    pub customer_portal: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Number(i64),
    Text(String),
}

impl From<IdValue> for String {
    fn from(value: IdValue) -> Self {
        match value {
            IdValue::Number(n) => n.to_string(),
            IdValue::Text(s) => s,
        }
    }
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    IdValue::deserialize(deserializer).map(String::from)
}

fn opt_id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<IdValue>::deserialize(deserializer)?.map(String::from))
}

impl WebhookEvent {
    /// Parse a raw (already signature-checked) request body
    pub fn from_slice(body: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(body)
            .map_err(|e| DomainError::ValidationError(format!("Malformed webhook payload: {e}")))
    }

    pub fn kind(&self) -> WebhookEventKind {
        match self.meta.event_name.as_str() {
            "subscription_created" => WebhookEventKind::SubscriptionCreated,
            "subscription_updated" => WebhookEventKind::SubscriptionUpdated,
            _ => WebhookEventKind::Other,
        }
    }

    /// The user id attached at checkout as custom data
    pub fn user_id(&self) -> Result<Snowflake, DomainError> {
        self.meta
            .custom_data
            .as_ref()
            .and_then(|custom| custom.user_id.as_deref())
            .ok_or_else(|| DomainError::ValidationError("Webhook has no user_id custom data".into()))?
            .parse()
            .map_err(|_| DomainError::ValidationError("Webhook user_id is not a valid id".into()))
    }

    /// Subscription row described by this event
    pub fn to_subscription(&self, id: Snowflake, user_id: Snowflake) -> Result<Subscription, DomainError> {
        let attributes = &self.data.attributes;
        let status: SubscriptionStatus = attributes.status.parse().map_err(|_| {
            DomainError::ValidationError(format!("Unknown subscription status: {}", attributes.status))
        })?;
        let now = Utc::now();

        Ok(Subscription {
            id,
            user_id,
            provider_subscription_id: self.data.id.clone(),
            customer_id: attributes.customer_id.clone(),
            variant_id: attributes.variant_id.clone(),
            status,
            renews_at: attributes.renews_at,
            ends_at: attributes.ends_at,
            customer_portal_url: attributes.urls.as_ref().and_then(|urls| urls.customer_portal.clone()),
            created_at: now,
            updated_at: now,
        })
    }
}
