//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use linkify_common::{AppConfig, AppError, JwtService};
use linkify_core::SnowflakeGenerator;
use linkify_db::{
    create_pool, run_migrations, PgAnalyticsRepository, PgAppearanceRepository, PgFormRepository,
    PgLinkRepository, PgPool, PgSectionRepository, PgSocialLinkRepository,
    PgSubscriptionRepository, PgTestimonialRepository, PgUserRepository, PoolConfig,
};
use linkify_integrations::{CloudinaryClient, LemonSqueezyClient};
use linkify_service::{ServiceContext, ServiceContextBuilder, ServiceSettings};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Submission quotas refill within a minute, so idle clients are dropped at that pace
const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    Ok(router.with_state(state))
}

/// Wire repositories and outbound clients into a service context
pub fn build_service_context(pool: &PgPool, config: &AppConfig) -> Result<ServiceContext, AppError> {
    if !config.cloudinary.is_configured() {
        warn!("Cloudinary is not configured; image uploads are disabled");
    }
    if !config.lemonsqueezy.is_configured() {
        warn!("LemonSqueezy is not configured; checkout is disabled");
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .section_repo(Arc::new(PgSectionRepository::new(pool.clone())))
        .link_repo(Arc::new(PgLinkRepository::new(pool.clone())))
        .social_link_repo(Arc::new(PgSocialLinkRepository::new(pool.clone())))
        .testimonial_repo(Arc::new(PgTestimonialRepository::new(pool.clone())))
        .form_repo(Arc::new(PgFormRepository::new(pool.clone())))
        .analytics_repo(Arc::new(PgAnalyticsRepository::new(pool.clone())))
        .appearance_repo(Arc::new(PgAppearanceRepository::new(pool.clone())))
        .subscription_repo(Arc::new(PgSubscriptionRepository::new(pool.clone())))
        .image_store(Arc::new(CloudinaryClient::new(config.cloudinary.clone())))
        .billing(Arc::new(LemonSqueezyClient::new(config.lemonsqueezy.clone())))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .settings(ServiceSettings {
            public_base_url: config.app.public_base_url.clone(),
            webhook_secret: config.lemonsqueezy.webhook_secret.clone(),
        })
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool_config = PoolConfig::new(
        config.database.url.clone(),
        config.database.max_connections,
        config.database.min_connections,
    );
    let pool = create_pool(&pool_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let service_context = build_service_context(&pool, &config)?;

    let state = AppState::new(service_context, config, pool);
    state.submission_limiter().spawn_pruner(LIMITER_PRUNE_INTERVAL);

    Ok(state)
}

/// Run the HTTP server until the listener fails
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    // Peer addresses feed the per-client submission limiter
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {}", e)))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
