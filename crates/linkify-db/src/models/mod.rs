//! Database models - SQLx-compatible structs for PostgreSQL tables

mod analytics;
mod appearance;
mod form;
mod link;
mod section;
mod subscription;
mod testimonial;
mod user;

pub use analytics::{DailyCountModel, KindCountModel, LinkClicksModel, ReferrerCountModel};
pub use appearance::{ButtonStyleModel, LayoutModel, SettingsModel, ThemeModel};
pub use form::{FormModel, FormSubmissionModel};
pub use link::{LinkModel, SocialLinkModel};
pub use section::SectionModel;
pub use subscription::SubscriptionModel;
pub use testimonial::TestimonialModel;
pub use user::UserModel;
