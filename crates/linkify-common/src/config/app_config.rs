//! Application configuration
//!
//! Everything is read from environment variables (after loading `.env` if
//! present). Only `DATABASE_URL` and `JWT_SECRET` are required; third-party
//! credentials default to empty, which disables the matching integration.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
    pub cloudinary: CloudinaryConfig,
    pub lemonsqueezy: LemonSqueezyConfig,
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
    /// Public origin of the profile pages, used for checkout redirects
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Seconds
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    /// Seconds
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// Per-IP quota for the public testimonial and form endpoints
    #[serde(default = "default_submissions_per_minute")]
    pub submissions_per_minute: u32,
    /// Take the client address from `x-forwarded-for`; only safe behind a
    /// proxy that overwrites the header
    #[serde(default)]
    pub trust_proxy: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    #[serde(default = "default_cloudinary_folder")]
    pub folder: String,
}

impl CloudinaryConfig {
    pub fn is_configured(&self) -> bool {
        !self.cloud_name.is_empty() && !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LemonSqueezyConfig {
    pub api_key: String,
    pub store_id: String,
    pub variant_id: String,
    pub webhook_secret: String,
}

impl LemonSqueezyConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.store_id.is_empty() && !self.variant_id.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Lifetime of the `viewed-at` cookie in seconds
    #[serde(default = "default_cookie_max_age")]
    pub cookie_max_age: i64,
}

fn default_app_name() -> String {
    "linkify".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> i64 {
    2_592_000 // 30 days
}

fn default_requests_per_second() -> u32 {
    20
}

fn default_burst() -> u32 {
    100
}

fn default_submissions_per_minute() -> u32 {
    5
}

fn default_cloudinary_folder() -> String {
    "linkify".to_string()
}

fn default_cookie_max_age() -> i64 {
    86_400 // 1 day
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T: FromStr>(key: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        _ => Ok(default()),
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(key))
}

fn optional(key: &'static str) -> String {
    env::var(key).unwrap_or_default()
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
                public_base_url: env::var("PUBLIC_BASE_URL")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .unwrap_or_else(|_| default_public_base_url()),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: parse_or("API_PORT", default_port)?,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            jwt: JwtConfig {
                secret: required("JWT_SECRET")?,
                access_token_expiry: parse_or("JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry)?,
                refresh_token_expiry: parse_or("JWT_REFRESH_TOKEN_EXPIRY", default_refresh_token_expiry)?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second)?,
                burst: parse_or("RATE_LIMIT_BURST", default_burst)?,
                submissions_per_minute: parse_or(
                    "SUBMISSION_RATE_LIMIT_PER_MINUTE",
                    default_submissions_per_minute,
                )?,
                trust_proxy: parse_or("TRUST_PROXY", || false)?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig {
                worker_id: parse_or("WORKER_ID", || 0)?,
            },
            cloudinary: CloudinaryConfig {
                cloud_name: optional("CLOUDINARY_CLOUD_NAME"),
                api_key: optional("CLOUDINARY_API_KEY"),
                api_secret: optional("CLOUDINARY_API_SECRET"),
                folder: env::var("CLOUDINARY_FOLDER").unwrap_or_else(|_| default_cloudinary_folder()),
            },
            lemonsqueezy: LemonSqueezyConfig {
                api_key: optional("LEMONSQUEEZY_API_KEY"),
                store_id: optional("LEMONSQUEEZY_STORE_ID"),
                variant_id: optional("LEMONSQUEEZY_VARIANT_ID"),
                webhook_secret: optional("LEMONSQUEEZY_WEBHOOK_SECRET"),
            },
            analytics: AnalyticsConfig {
                cookie_max_age: parse_or("ANALYTICS_COOKIE_MAX_AGE", default_cookie_max_age)?,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("PRODUCTION"), Some(Environment::Production));
        assert_eq!(Environment::parse("dev"), Some(Environment::Development));
        assert_eq!(Environment::parse("qa"), None);
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_development());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_name(), "linkify");
        assert_eq!(default_port(), 8080);
        assert_eq!(default_access_token_expiry(), 900);
        assert_eq!(default_submissions_per_minute(), 5);
        assert_eq!(default_cookie_max_age(), 86_400);
    }

    #[test]
    fn test_trust_proxy_defaults_off() {
        let trust: bool = parse_or("LINKIFY_TEST_UNSET_TRUST_PROXY", || false).unwrap();
        assert!(!trust);
    }

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        let value: u32 = parse_or("LINKIFY_TEST_SURELY_UNSET_VAR", || 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_integration_configured_flags() {
        assert!(!CloudinaryConfig::default().is_configured());
        let cloudinary = CloudinaryConfig {
            cloud_name: "demo".into(),
            api_key: "key".into(),
            api_secret: "secret".into(),
            folder: "linkify".into(),
        };
        assert!(cloudinary.is_configured());
        assert!(!LemonSqueezyConfig::default().is_configured());
    }
}
