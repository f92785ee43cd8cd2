//! # linkify-integrations
//!
//! Clients for the third-party services behind the `ImageStore` and
//! `BillingProvider` ports, plus the LemonSqueezy webhook payload.
//!
//! Both clients can be built from an empty configuration; they then fail
//! every call with `DomainError::ExternalServiceError` instead of panicking,
//! so local development works without credentials.

pub mod cloudinary;
pub mod lemonsqueezy;

pub use cloudinary::CloudinaryClient;
pub use lemonsqueezy::{LemonSqueezyClient, WebhookEvent, WebhookEventKind};
