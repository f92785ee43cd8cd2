//! Cloudinary image store
//!
//! Browsers upload straight to Cloudinary with a signature issued here; the
//! backend only ever deletes assets.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use linkify_common::CloudinaryConfig;
use linkify_core::error::DomainError;
use linkify_core::traits::{ImageStore, UploadSignature};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";
const SIGNATURE_ALGORITHM: &str = "sha256";

/// Cloudinary REST client
#[derive(Clone)]
pub struct CloudinaryClient {
    client: Client,
    config: CloudinaryConfig,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self { client: Client::new(), config }
    }

    fn ensure_configured(&self) -> Result<(), DomainError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(DomainError::ExternalServiceError("Cloudinary is not configured".into()))
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{API_BASE}/{}/image/{action}", self.config.cloud_name)
    }

    fn new_public_id(&self) -> String {
        format!("{}/{}", self.config.folder.trim_end_matches('/'), Uuid::new_v4().simple())
    }
}

impl std::fmt::Debug for CloudinaryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryClient")
            .field("cloud_name", &self.config.cloud_name)
            .field("folder", &self.config.folder)
            .finish_non_exhaustive()
    }
}

/// Sign request parameters the way Cloudinary expects
///
/// Parameters are sorted by name, joined as `k=v&k=v`, suffixed with the API
/// secret and hashed. `file`, `api_key`, `resource_type` and
/// `signature_algorithm` are never part of the signed string.
pub fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params
        .iter()
        .filter(|(key, value)| {
            !value.is_empty()
                && !matches!(*key, "file" | "api_key" | "resource_type" | "signature_algorithm")
        })
        .collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[async_trait]
impl ImageStore for CloudinaryClient {
    fn upload_signature(&self) -> Result<UploadSignature, DomainError> {
        self.ensure_configured()?;

        let public_id = self.new_public_id();
        let timestamp = Utc::now().timestamp();
        let signature = sign_params(
            &[("public_id", public_id.clone()), ("timestamp", timestamp.to_string())],
            &self.config.api_secret,
        );

        Ok(UploadSignature {
            upload_url: self.endpoint("upload"),
            api_key: self.config.api_key.clone(),
            public_id,
            timestamp,
            signature,
            signature_algorithm: SIGNATURE_ALGORITHM.to_string(),
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        self.ensure_configured()?;

        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("public_id", public_id.to_string()), ("timestamp", timestamp.clone())],
            &self.config.api_secret,
        );

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", public_id),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.config.api_key.as_str()),
                ("signature", signature.as_str()),
                ("signature_algorithm", SIGNATURE_ALGORITHM),
            ])
            .send()
            .await
            .map_err(|e| DomainError::ExternalServiceError(format!("Cloudinary request failed: {e}")))?
            .error_for_status()
            .map_err(|e| DomainError::ExternalServiceError(format!("Cloudinary rejected destroy: {e}")))?
            .json::<DestroyResponse>()
            .await
            .map_err(|e| DomainError::ExternalServiceError(format!("Cloudinary response: {e}")))?;

        match response.result.as_str() {
            "ok" => {
                debug!(public_id, "Image deleted");
                Ok(())
            }
            // Already gone counts as deleted
            "not found" => {
                warn!(public_id, "Image was already deleted");
                Ok(())
            }
            other => Err(DomainError::ExternalServiceError(format!(
                "Cloudinary destroy returned {other}"
            ))),
        }
    }
}
