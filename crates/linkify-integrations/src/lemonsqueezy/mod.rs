//! LemonSqueezy billing: hosted checkout and subscription webhooks

mod client;
mod webhook;

pub use client::LemonSqueezyClient;
pub use webhook::{WebhookEvent, WebhookEventKind};
