//! Social link service - the icon bar on the public page

use linkify_core::entities::{Owned, SocialLink, SocialPlatform};
use linkify_core::error::DomainError;
use linkify_core::Snowflake;
use tracing::{info, instrument};
use url::Url;
use validator::ValidateEmail;

use crate::dto::{
    CreateSocialLinkRequest, ReorderRequest, SocialLinkResponse, UpdateSocialLinkRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct SocialLinkService<'a> {
    ctx: &'a ServiceContext,
}

/// Normalize the target for a platform
///
/// Email accepts a bare address or a `mailto:` URL; every other platform
/// needs an absolute http(s) URL.
pub fn normalize_social_url(platform: SocialPlatform, raw: &str) -> ServiceResult<String> {
    let value = raw.trim();

    if platform == SocialPlatform::Email {
        let address = value.strip_prefix("mailto:").unwrap_or(value);
        if !address.validate_email() {
            return Err(ServiceError::validation("Invalid email address"));
        }
        return Ok(address.to_string());
    }

    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
            Ok(url.to_string())
        }
        _ => Err(ServiceError::validation(format!(
            "Invalid URL for {}",
            platform.as_str()
        ))),
    }
}

impl<'a> SocialLinkService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn owned(&self, user_id: Snowflake, id: Snowflake) -> ServiceResult<SocialLink> {
        let social_link = self
            .ctx
            .social_link_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::SocialLinkNotFound(id))?;
        social_link.ensure_owned_by(user_id)?;
        Ok(social_link)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<SocialLinkResponse>> {
        let links = self.ctx.social_link_repo().find_by_user(user_id).await?;
        Ok(links.iter().map(SocialLinkResponse::from).collect())
    }

    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: Snowflake,
        request: CreateSocialLinkRequest,
    ) -> ServiceResult<SocialLinkResponse> {
        let url = normalize_social_url(request.platform, &request.url)?;

        let mut social_link = SocialLink::new(self.ctx.generate_id(), user_id, request.platform, url, 0);
        social_link.index = self.ctx.social_link_repo().create(&social_link).await?;

        info!(user_id = %user_id, platform = social_link.platform.as_str(), "Social link created");

        Ok(SocialLinkResponse::from(social_link))
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Snowflake,
        id: Snowflake,
        request: UpdateSocialLinkRequest,
    ) -> ServiceResult<SocialLinkResponse> {
        let mut social_link = self.owned(user_id, id).await?;

        let platform = request.platform.unwrap_or(social_link.platform);
        let url = request.url.as_deref().unwrap_or(&social_link.url);
        social_link.url = normalize_social_url(platform, url)?;
        social_link.platform = platform;

        self.ctx.social_link_repo().update(&social_link).await?;
        Ok(SocialLinkResponse::from(social_link))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Snowflake, id: Snowflake) -> ServiceResult<()> {
        let social_link = self.owned(user_id, id).await?;
        self.ctx.social_link_repo().delete(&social_link).await?;
        Ok(())
    }

    #[instrument(skip(self, request))]
    pub async fn reorder(
        &self,
        user_id: Snowflake,
        request: ReorderRequest,
    ) -> ServiceResult<Vec<SocialLinkResponse>> {
        self.ctx.social_link_repo().reorder(user_id, &request.ids).await?;

        self.list(user_id).await
    }
}
