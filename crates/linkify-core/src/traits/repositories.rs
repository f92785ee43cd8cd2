//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; `linkify-db` provides the
//! PostgreSQL implementation. Methods that touch `index` columns run in a
//! single transaction that locks the parent row, so concurrent writers to
//! one list see each other's changes.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::analytics::Window;
use crate::entitlements::Entitlements;
use crate::entities::{
    AnalyticsEvent, Appearance, ButtonStyle, EventKind, Form, FormSubmission, Layout, Link,
    Section, Settings, SocialLink, Subscription, Testimonial, Theme, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Lookup by the public slug
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Insert the user together with their default appearance rows
    async fn create(&self, user: &User, password_hash: &str, appearance: &Appearance) -> RepoResult<()>;

    /// Update profile fields and username
    async fn update(&self, user: &User) -> RepoResult<()>;

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Section Repository
// ============================================================================

#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Section>>;

    /// All sections of a user ordered by index
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Section>>;

    /// Append to the end of the user's list; returns the assigned index
    async fn create(&self, section: &Section) -> RepoResult<i32>;

    async fn update(&self, section: &Section) -> RepoResult<()>;

    /// Delete the section and its links, then close the gap in sibling indexes
    async fn delete(&self, section: &Section) -> RepoResult<()>;

    /// `ids` must be a permutation of the user's current sections
    async fn reorder(&self, user_id: Snowflake, ids: &[Snowflake]) -> RepoResult<()>;
}

// ============================================================================
// Link Repository
// ============================================================================

#[async_trait]
pub trait LinkRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Link>>;

    /// Links of one section ordered by index
    async fn find_by_section(&self, section_id: Snowflake) -> RepoResult<Vec<Link>>;

    /// All links of a user ordered by section then index
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Link>>;

    /// Append to the end of the section; returns the assigned index
    async fn create(&self, link: &Link) -> RepoResult<i32>;

    async fn update(&self, link: &Link) -> RepoResult<()>;

    /// Delete the link and close the gap in its section
    async fn delete(&self, link: &Link) -> RepoResult<()>;

    async fn reorder(&self, section_id: Snowflake, ids: &[Snowflake]) -> RepoResult<()>;
}

// ============================================================================
// Social Link Repository
// ============================================================================

#[async_trait]
pub trait SocialLinkRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<SocialLink>>;

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<SocialLink>>;

    async fn create(&self, social_link: &SocialLink) -> RepoResult<i32>;

    async fn update(&self, social_link: &SocialLink) -> RepoResult<()>;

    async fn delete(&self, social_link: &SocialLink) -> RepoResult<()>;

    async fn reorder(&self, user_id: Snowflake, ids: &[Snowflake]) -> RepoResult<()>;
}

// ============================================================================
// Testimonial Repository
// ============================================================================

#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Testimonial>>;

    /// Every testimonial received by a user, ordered by index
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Testimonial>>;

    /// Testimonials with `should_show` set, ordered by index
    async fn find_showcased(&self, user_id: Snowflake) -> RepoResult<Vec<Testimonial>>;

    /// Append to the end of the recipient's list; returns the assigned index
    async fn create(&self, testimonial: &Testimonial) -> RepoResult<i32>;

    /// Show or hide a testimonial
    ///
    /// Showing a hidden one counts the user's showcased testimonials against
    /// `entitlements` in the same transaction as the write.
    async fn set_visibility(
        &self,
        testimonial: &Testimonial,
        should_show: bool,
        entitlements: Entitlements,
    ) -> RepoResult<()>;

    async fn delete(&self, testimonial: &Testimonial) -> RepoResult<()>;

    async fn reorder(&self, user_id: Snowflake, ids: &[Snowflake]) -> RepoResult<()>;
}

// ============================================================================
// Form Repository
// ============================================================================

#[async_trait]
pub trait FormRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Form>>;

    /// Insert or update the user's form
    async fn upsert(&self, form: &Form) -> RepoResult<()>;

    async fn create_submission(&self, submission: &FormSubmission) -> RepoResult<()>;

    async fn find_submission(&self, id: Snowflake) -> RepoResult<Option<FormSubmission>>;

    /// Newest first; `before` pages backwards by id
    async fn find_submissions(
        &self,
        user_id: Snowflake,
        before: Option<Snowflake>,
        limit: i64,
    ) -> RepoResult<Vec<FormSubmission>>;

    async fn count_submissions_since(&self, user_id: Snowflake, since: DateTime<Utc>) -> RepoResult<i64>;

    async fn delete_submission(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Analytics Repository
// ============================================================================

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn record(&self, event: &AnalyticsEvent) -> RepoResult<()>;

    /// Event counts grouped by kind
    async fn count_by_kind(&self, user_id: Snowflake, window: Window) -> RepoResult<Vec<(EventKind, i64)>>;

    /// Event counts grouped by UTC day and kind
    async fn count_by_day(
        &self,
        user_id: Snowflake,
        window: Window,
    ) -> RepoResult<Vec<(NaiveDate, EventKind, i64)>>;

    /// Click counts per link, most clicked first
    async fn clicks_by_link(
        &self,
        user_id: Snowflake,
        window: Window,
        limit: i64,
    ) -> RepoResult<Vec<(Snowflake, i64)>>;

    /// Event counts per referrer host, most frequent first
    async fn count_by_referrer(
        &self,
        user_id: Snowflake,
        window: Window,
        limit: i64,
    ) -> RepoResult<Vec<(Option<String>, i64)>>;
}

// ============================================================================
// Appearance Repository
// ============================================================================

#[async_trait]
pub trait AppearanceRepository: Send + Sync {
    /// Stored rows, with defaults for any that are missing
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Appearance>;

    async fn save_theme(&self, theme: &Theme) -> RepoResult<()>;

    async fn save_layout(&self, layout: &Layout) -> RepoResult<()>;

    async fn save_button(&self, button: &ButtonStyle) -> RepoResult<()>;

    async fn save_settings(&self, settings: &Settings) -> RepoResult<()>;
}

// ============================================================================
// Subscription Repository
// ============================================================================

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Subscription>>;

    /// Insert or replace the user's subscription, keyed by user id
    async fn upsert(&self, subscription: &Subscription) -> RepoResult<()>;
}
