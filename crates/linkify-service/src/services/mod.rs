//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod analytics;
pub mod appearance;
pub mod auth;
pub mod billing;
pub mod context;
pub mod error;
pub mod form;
pub mod link;
pub mod media;
pub mod profile;
pub mod public_profile;
pub mod section;
pub mod social_link;
pub mod testimonial;

#[cfg(test)]
pub(crate) mod testing;

pub use analytics::{AnalyticsService, VisitContext};
pub use appearance::AppearanceService;
pub use auth::AuthService;
pub use billing::{BillingService, WebhookOutcome};
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use error::{ServiceError, ServiceResult};
pub use form::FormService;
pub use link::LinkService;
pub use media::MediaService;
pub use profile::ProfileService;
pub use public_profile::PublicProfileService;
pub use section::SectionService;
pub use social_link::SocialLinkService;
pub use testimonial::TestimonialService;
