//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, configuration and the submission rate limiter.

use std::sync::Arc;

use linkify_common::{AppConfig, JwtService};
use linkify_db::PgPool;
use linkify_service::ServiceContext;

use crate::middleware::SubmissionLimiter;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Pool handle kept for readiness checks
    pool: PgPool,
    submission_limiter: Arc<SubmissionLimiter>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig, pool: PgPool) -> Self {
        let submission_limiter = Arc::new(SubmissionLimiter::new(
            config.rate_limit.submissions_per_minute,
            config.rate_limit.trust_proxy,
        ));
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            pool,
            submission_limiter,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn submission_limiter(&self) -> &Arc<SubmissionLimiter> {
        &self.submission_limiter
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .finish_non_exhaustive()
    }
}
