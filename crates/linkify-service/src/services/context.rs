//! Service context - dependency container for services
//!
//! Holds all repositories, outbound clients and other dependencies needed by
//! services.

use std::sync::Arc;

use chrono::Utc;
use linkify_common::auth::JwtService;
use linkify_core::entities::plan_for;
use linkify_core::traits::{
    AnalyticsRepository, AppearanceRepository, BillingProvider, FormRepository, ImageStore,
    LinkRepository, SectionRepository, SocialLinkRepository, SubscriptionRepository,
    TestimonialRepository, UserRepository,
};
use linkify_core::{Plan, Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Settings services read at request time
#[derive(Debug, Clone, Default)]
pub struct ServiceSettings {
    /// Public origin of the site, used to build checkout redirects
    pub public_base_url: String,
    /// Shared secret for billing webhook signatures; empty rejects every webhook
    pub webhook_secret: String,
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Image store and billing provider
/// - JWT service for authentication
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    section_repo: Arc<dyn SectionRepository>,
    link_repo: Arc<dyn LinkRepository>,
    social_link_repo: Arc<dyn SocialLinkRepository>,
    testimonial_repo: Arc<dyn TestimonialRepository>,
    form_repo: Arc<dyn FormRepository>,
    analytics_repo: Arc<dyn AnalyticsRepository>,
    appearance_repo: Arc<dyn AppearanceRepository>,
    subscription_repo: Arc<dyn SubscriptionRepository>,

    // Outbound integrations
    image_store: Arc<dyn ImageStore>,
    billing: Arc<dyn BillingProvider>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    settings: ServiceSettings,
}

impl ServiceContext {
    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn section_repo(&self) -> &dyn SectionRepository {
        self.section_repo.as_ref()
    }

    pub fn link_repo(&self) -> &dyn LinkRepository {
        self.link_repo.as_ref()
    }

    pub fn social_link_repo(&self) -> &dyn SocialLinkRepository {
        self.social_link_repo.as_ref()
    }

    pub fn testimonial_repo(&self) -> &dyn TestimonialRepository {
        self.testimonial_repo.as_ref()
    }

    pub fn form_repo(&self) -> &dyn FormRepository {
        self.form_repo.as_ref()
    }

    pub fn analytics_repo(&self) -> &dyn AnalyticsRepository {
        self.analytics_repo.as_ref()
    }

    pub fn appearance_repo(&self) -> &dyn AppearanceRepository {
        self.appearance_repo.as_ref()
    }

    pub fn subscription_repo(&self) -> &dyn SubscriptionRepository {
        self.subscription_repo.as_ref()
    }

    // === Integrations ===

    pub fn image_store(&self) -> &dyn ImageStore {
        self.image_store.as_ref()
    }

    pub fn billing(&self) -> &dyn BillingProvider {
        self.billing.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Plan the user is on right now, derived from their subscription row
    pub async fn current_plan(&self, user_id: Snowflake) -> ServiceResult<Plan> {
        let subscription = self.subscription_repo.find_by_user(user_id).await?;
        Ok(plan_for(subscription.as_ref(), Utc::now()))
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("integrations", &"...")
            .field("public_base_url", &self.settings.public_base_url)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    section_repo: Option<Arc<dyn SectionRepository>>,
    link_repo: Option<Arc<dyn LinkRepository>>,
    social_link_repo: Option<Arc<dyn SocialLinkRepository>>,
    testimonial_repo: Option<Arc<dyn TestimonialRepository>>,
    form_repo: Option<Arc<dyn FormRepository>>,
    analytics_repo: Option<Arc<dyn AnalyticsRepository>>,
    appearance_repo: Option<Arc<dyn AppearanceRepository>>,
    subscription_repo: Option<Arc<dyn SubscriptionRepository>>,
    image_store: Option<Arc<dyn ImageStore>>,
    billing: Option<Arc<dyn BillingProvider>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    settings: ServiceSettings,
}

fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn section_repo(mut self, repo: Arc<dyn SectionRepository>) -> Self {
        self.section_repo = Some(repo);
        self
    }

    pub fn link_repo(mut self, repo: Arc<dyn LinkRepository>) -> Self {
        self.link_repo = Some(repo);
        self
    }

    pub fn social_link_repo(mut self, repo: Arc<dyn SocialLinkRepository>) -> Self {
        self.social_link_repo = Some(repo);
        self
    }

    pub fn testimonial_repo(mut self, repo: Arc<dyn TestimonialRepository>) -> Self {
        self.testimonial_repo = Some(repo);
        self
    }

    pub fn form_repo(mut self, repo: Arc<dyn FormRepository>) -> Self {
        self.form_repo = Some(repo);
        self
    }

    pub fn analytics_repo(mut self, repo: Arc<dyn AnalyticsRepository>) -> Self {
        self.analytics_repo = Some(repo);
        self
    }

    pub fn appearance_repo(mut self, repo: Arc<dyn AppearanceRepository>) -> Self {
        self.appearance_repo = Some(repo);
        self
    }

    pub fn subscription_repo(mut self, repo: Arc<dyn SubscriptionRepository>) -> Self {
        self.subscription_repo = Some(repo);
        self
    }

    pub fn image_store(mut self, store: Arc<dyn ImageStore>) -> Self {
        self.image_store = Some(store);
        self
    }

    pub fn billing(mut self, billing: Arc<dyn BillingProvider>) -> Self {
        self.billing = Some(billing);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            section_repo: required(self.section_repo, "section_repo")?,
            link_repo: required(self.link_repo, "link_repo")?,
            social_link_repo: required(self.social_link_repo, "social_link_repo")?,
            testimonial_repo: required(self.testimonial_repo, "testimonial_repo")?,
            form_repo: required(self.form_repo, "form_repo")?,
            analytics_repo: required(self.analytics_repo, "analytics_repo")?,
            appearance_repo: required(self.appearance_repo, "appearance_repo")?,
            subscription_repo: required(self.subscription_repo, "subscription_repo")?,
            image_store: required(self.image_store, "image_store")?,
            billing: required(self.billing, "billing")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: required(self.snowflake_generator, "snowflake_generator")?,
            settings: self.settings,
        })
    }
}
