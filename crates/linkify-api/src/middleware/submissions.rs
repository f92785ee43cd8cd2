//! Per-client rate limiting for the public submission endpoints
//!
//! Testimonials and contact forms can be posted by anyone, so each client
//! address gets its own quota on top of the global limiter. The client is
//! the TCP peer unless the server is configured to trust a proxy's
//! `x-forwarded-for` header.

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::response::ApiError;
use crate::state::AppState;

pub struct SubmissionLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    trust_proxy: bool,
}

impl SubmissionLimiter {
    pub fn new(per_minute: u32, trust_proxy: bool) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN));
        Self {
            limiter: RateLimiter::keyed(quota),
            trust_proxy,
        }
    }

    /// Take one unit of quota for `client`; false once the quota is spent
    pub fn check(&self, client: &str) -> bool {
        self.limiter.check_key(&client.to_string()).is_ok()
    }

    /// Key the quota is charged to
    ///
    /// The first `x-forwarded-for` hop counts only when the proxy is
    /// trusted; otherwise clients could pick a fresh key per request.
    pub fn client_key(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
        let forwarded = if self.trust_proxy { forwarded_for(headers) } else { None };

        forwarded
            .or_else(|| peer.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Forget clients whose quota has fully replenished
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Prune on a fixed period for as long as the limiter is shared
    pub fn spawn_pruner(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let limiter = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = interval(every);
            loop {
                ticker.tick().await;
                let Some(limiter) = limiter.upgrade() else {
                    break;
                };
                limiter.prune();
                tracing::debug!(clients = limiter.tracked_clients(), "Submission limiter pruned");
            }
        })
    }
}

impl std::fmt::Debug for SubmissionLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionLimiter")
            .field("tracked_clients", &self.limiter.len())
            .field("trust_proxy", &self.trust_proxy)
            .finish()
    }
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Guard for the public submission handlers
///
/// Extracting it takes one unit of the client's quota and rejects the
/// request with 429 once the quota is spent.
#[derive(Debug, Clone)]
pub struct SubmissionPermit {
    pub client: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for SubmissionPermit
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        let app_state = AppState::from_ref(state);
        let limiter = app_state.submission_limiter();
        let client = limiter.client_key(&parts.headers, peer);

        if !limiter.check(&client) {
            tracing::warn!(client = %client, "Submission rate limit exceeded");
            return Err(ApiError::RateLimited);
        }

        Ok(Self { client })
    }
}
