//! Ports for the third-party services the backend talks to

use async_trait::async_trait;
use serde::Serialize;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Parameters a browser needs to upload an image straight to the image host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadSignature {
    pub upload_url: String,
    pub api_key: String,
    pub public_id: String,
    pub timestamp: i64,
    pub signature: String,
    pub signature_algorithm: String,
}

/// Image hosting (Cloudinary in production)
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Sign a direct upload into the configured folder
    fn upload_signature(&self) -> Result<UploadSignature, DomainError>;

    /// Remove an uploaded asset by its public id
    async fn delete(&self, public_id: &str) -> Result<(), DomainError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub user_id: Snowflake,
    pub email: String,
    pub name: String,
    /// Where the provider sends the customer after paying
    pub redirect_url: String,
}

/// Hosted checkout (LemonSqueezy in production)
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Create a checkout session and return its URL
    async fn create_checkout(&self, request: &CheckoutRequest) -> Result<String, DomainError>;
}
