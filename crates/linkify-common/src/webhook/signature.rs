//! HMAC-SHA256 signatures for incoming billing webhooks
//!
//! The provider signs the raw request body with the shared secret and sends
//! the hex digest in the `x-signature` header.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-signature";

fn mac(secret: &str, body: &[u8]) -> Result<HmacSha256, AppError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::internal(anyhow::anyhow!("Invalid HMAC key: {e}")))?;
    mac.update(body);
    Ok(mac)
}

/// Hex-encoded HMAC-SHA256 of `body`
pub fn sign(secret: &str, body: &[u8]) -> Result<String, AppError> {
    Ok(hex::encode(mac(secret, body)?.finalize().into_bytes()))
}

/// Verify `signature` (hex) against `body` in constant time
///
/// An empty secret, a missing or non-hex signature, and a digest mismatch
/// all yield [`AppError::InvalidSignature`].
pub fn verify_signature(secret: &str, body: &[u8], signature: Option<&str>) -> Result<(), AppError> {
    if secret.is_empty() {
        return Err(AppError::InvalidSignature);
    }
    let signature = signature.map(str::trim).filter(|s| !s.is_empty()).ok_or(AppError::InvalidSignature)?;
    let expected = hex::decode(signature).map_err(|_| AppError::InvalidSignature)?;

    mac(secret, body)?
        .verify_slice(&expected)
        .map_err(|_| AppError::InvalidSignature)
}
