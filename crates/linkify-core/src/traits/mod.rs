mod integrations;
mod repositories;

pub use integrations::{BillingProvider, CheckoutRequest, ImageStore, UploadSignature};
pub use repositories::{
    AnalyticsRepository, AppearanceRepository, FormRepository, LinkRepository, RepoResult,
    SectionRepository, SocialLinkRepository, SubscriptionRepository, TestimonialRepository,
    UserRepository,
};
