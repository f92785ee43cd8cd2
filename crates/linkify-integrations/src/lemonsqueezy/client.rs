//! LemonSqueezy checkout client (JSON:API)

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use linkify_common::LemonSqueezyConfig;
use linkify_core::error::DomainError;
use linkify_core::traits::{BillingProvider, CheckoutRequest};

const CHECKOUTS_URL: &str = "https://api.lemonsqueezy.com/v1/checkouts";
const JSON_API: &str = "application/vnd.api+json";

/// LemonSqueezy REST client
#[derive(Clone)]
pub struct LemonSqueezyClient {
    client: Client,
    config: LemonSqueezyConfig,
}

impl LemonSqueezyClient {
    pub fn new(config: LemonSqueezyConfig) -> Self {
        Self { client: Client::new(), config }
    }
}

impl std::fmt::Debug for LemonSqueezyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemonSqueezyClient")
            .field("store_id", &self.config.store_id)
            .field("variant_id", &self.config.variant_id)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// JSON:API documents
// ============================================================================

#[derive(Debug, Serialize)]
struct CheckoutDocument<'a> {
    data: CheckoutData<'a>,
}

#[derive(Debug, Serialize)]
struct CheckoutData<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: CheckoutAttributes<'a>,
    relationships: CheckoutRelationships<'a>,
}

#[derive(Debug, Serialize)]
struct CheckoutAttributes<'a> {
    checkout_data: CheckoutFields<'a>,
    product_options: ProductOptions<'a>,
}

#[derive(Debug, Serialize)]
struct CheckoutFields<'a> {
    email: &'a str,
    name: &'a str,
    custom: CustomData,
}

/// Echoed back in every webhook for this subscription
#[derive(Debug, Serialize)]
struct CustomData {
    user_id: String,
}

#[derive(Debug, Serialize)]
struct ProductOptions<'a> {
    redirect_url: &'a str,
}

#[derive(Debug, Serialize)]
struct CheckoutRelationships<'a> {
    store: Relationship<'a>,
    variant: Relationship<'a>,
}

#[derive(Debug, Serialize)]
struct Relationship<'a> {
    data: ResourceId<'a>,
}

#[derive(Debug, Serialize)]
struct ResourceId<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    id: &'a str,
}

#[derive(Debug, Deserialize)]
struct CheckoutResponse {
    data: CheckoutResponseData,
}

#[derive(Debug, Deserialize)]
struct CheckoutResponseData {
    attributes: CheckoutResponseAttributes,
}

#[derive(Debug, Deserialize)]
struct CheckoutResponseAttributes {
    url: String,
}

fn checkout_document<'a>(config: &'a LemonSqueezyConfig, request: &'a CheckoutRequest) -> CheckoutDocument<'a> {
    CheckoutDocument {
        data: CheckoutData {
            kind: "checkouts",
            attributes: CheckoutAttributes {
                checkout_data: CheckoutFields {
                    email: &request.email,
                    name: &request.name,
                    custom: CustomData { user_id: request.user_id.to_string() },
                },
                product_options: ProductOptions { redirect_url: &request.redirect_url },
            },
            relationships: CheckoutRelationships {
                store: Relationship { data: ResourceId { kind: "stores", id: &config.store_id } },
                variant: Relationship { data: ResourceId { kind: "variants", id: &config.variant_id } },
            },
        },
    }
}

#[async_trait]
impl BillingProvider for LemonSqueezyClient {
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    async fn create_checkout(&self, request: &CheckoutRequest) -> Result<String, DomainError> {
        if !self.config.is_configured() {
            return Err(DomainError::ExternalServiceError("LemonSqueezy is not configured".into()));
        }

        let body = serde_json::to_vec(&checkout_document(&self.config, request))
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        let response = self
            .client
            .post(CHECKOUTS_URL)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(ACCEPT, JSON_API)
            .header(CONTENT_TYPE, JSON_API)
            .body(body)
            .send()
            .await
            .map_err(|e| DomainError::ExternalServiceError(format!("LemonSqueezy request failed: {e}")))?
            .error_for_status()
            .map_err(|e| DomainError::ExternalServiceError(format!("LemonSqueezy rejected checkout: {e}")))?
            .json::<CheckoutResponse>()
            .await
            .map_err(|e| DomainError::ExternalServiceError(format!("LemonSqueezy response: {e}")))?;

        info!("Checkout created");
        Ok(response.data.attributes.url)
    }
}
