//! Repository implementations - PostgreSQL implementations of domain traits

mod analytics;
mod appearance;
mod error;
mod form;
mod link;
mod ordering;
mod section;
mod subscription;
mod testimonial;
mod user;

pub use analytics::PgAnalyticsRepository;
pub use appearance::PgAppearanceRepository;
pub use form::PgFormRepository;
pub use link::{PgLinkRepository, PgSocialLinkRepository};
pub use section::PgSectionRepository;
pub use subscription::PgSubscriptionRepository;
pub use testimonial::PgTestimonialRepository;
pub use user::PgUserRepository;
