//! Domain entities - core business objects

mod analytics_event;
mod appearance;
mod form;
mod link;
mod section;
mod social_link;
mod subscription;
mod testimonial;
mod user;

pub use analytics_event::{referrer_host, AnalyticsEvent, Device, EventKind};
pub use appearance::{
    Appearance, ButtonRadius, ButtonStyle, ButtonVariant, IconPlacement, ImageShape, Layout,
    LayoutStyle, Settings, Theme,
};
pub use form::{Form, FormSubmission};
pub use link::Link;
pub use section::Section;
pub use social_link::{SocialLink, SocialPlatform};
pub use subscription::{plan_for, Subscription, SubscriptionStatus};
pub use testimonial::{Testimonial, MAX_RATING, MIN_RATING};
pub use user::User;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Rows that belong to exactly one user
pub trait Owned {
    fn owner_id(&self) -> Snowflake;

    /// Fail with [`DomainError::NotOwner`] unless `actor` owns this row
    fn ensure_owned_by(&self, actor: Snowflake) -> Result<(), DomainError> {
        if self.owner_id() == actor {
            Ok(())
        } else {
            Err(DomainError::NotOwner)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_owned_by() {
        let section = Section::new(Snowflake::new(1), Snowflake::new(10), "Main".into(), 0);
        assert!(section.ensure_owned_by(Snowflake::new(10)).is_ok());
        assert!(matches!(
            section.ensure_owned_by(Snowflake::new(11)),
            Err(DomainError::NotOwner)
        ));
    }
}
