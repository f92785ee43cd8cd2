//! Configuration structs

mod app_config;

pub use app_config::{
    AnalyticsConfig, AppConfig, AppSettings, CloudinaryConfig, ConfigError, CorsConfig,
    DatabaseConfig, Environment, JwtConfig, LemonSqueezyConfig, RateLimitConfig, ServerConfig,
    SnowflakeConfig,
};
