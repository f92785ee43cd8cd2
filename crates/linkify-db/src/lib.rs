//! # linkify-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `linkify-core`. It handles:
//!
//! - Connection pool management and embedded migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers (`position` column to `index` field)
//! - Repository implementations, with transactional reorder and compaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use linkify_db::{create_pool, run_migrations, PoolConfig, PgSectionRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new("postgres://localhost/linkify", 10, 1)).await?;
//!     run_migrations(&pool).await?;
//!     let sections = PgSectionRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgAnalyticsRepository, PgAppearanceRepository, PgFormRepository, PgLinkRepository,
    PgSectionRepository, PgSocialLinkRepository, PgSubscriptionRepository,
    PgTestimonialRepository, PgUserRepository,
};
