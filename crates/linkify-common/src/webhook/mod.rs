//! Webhook authentication

mod signature;

pub use signature::{sign, verify_signature, SIGNATURE_HEADER};
