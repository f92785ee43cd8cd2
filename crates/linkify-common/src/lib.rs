//! # linkify-common
//!
//! Shared utilities: configuration, error handling, authentication, webhook
//! signatures and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod webhook;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_strength, verify_password, Claims, JwtService, TokenPair,
    TokenType,
};
pub use config::{
    AnalyticsConfig, AppConfig, AppSettings, CloudinaryConfig, ConfigError, CorsConfig,
    DatabaseConfig, Environment, JwtConfig, LemonSqueezyConfig, RateLimitConfig, ServerConfig,
    SnowflakeConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing, TracingConfig, TracingError};
pub use webhook::{verify_signature, SIGNATURE_HEADER};
