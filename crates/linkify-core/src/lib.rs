//! # linkify-core
//!
//! Domain layer: entities, value objects, business rules (ordering,
//! analytics arithmetic, plan entitlements), repository and integration ports.
//! This crate has no dependencies on infrastructure (database, web framework, etc.).

pub mod analytics;
pub mod entities;
pub mod entitlements;
pub mod error;
pub mod ordering;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use analytics::{AnalyticsRange, Window};
pub use entities::{
    AnalyticsEvent, Appearance, ButtonRadius, ButtonStyle, ButtonVariant, Device, EventKind,
    Form, FormSubmission, IconPlacement, ImageShape, Layout, LayoutStyle, Link, Owned, Section,
    Settings, SocialLink, SocialPlatform, Subscription, SubscriptionStatus, Testimonial, Theme,
    User,
};
pub use entitlements::{Entitlements, Plan};
pub use error::DomainError;
pub use traits::{
    AnalyticsRepository, AppearanceRepository, BillingProvider, CheckoutRequest, FormRepository,
    ImageStore, LinkRepository, RepoResult, SectionRepository, SocialLinkRepository,
    SubscriptionRepository, TestimonialRepository, UploadSignature, UserRepository,
};
pub use value_objects::{HexColor, Snowflake, SnowflakeGenerator, SnowflakeParseError, Username};
