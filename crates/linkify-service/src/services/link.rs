//! Link service - call-to-action entries inside sections

use linkify_core::entities::{Link, Owned};
use linkify_core::error::DomainError;
use linkify_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{CreateLinkRequest, LinkResponse, ReorderRequest, UpdateLinkRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::media::MediaService;
use super::section::SectionService;

pub struct LinkService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LinkService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn owned_link(&self, user_id: Snowflake, link_id: Snowflake) -> ServiceResult<Link> {
        let link = self
            .ctx
            .link_repo()
            .find_by_id(link_id)
            .await?
            .ok_or(DomainError::LinkNotFound(link_id))?;
        link.ensure_owned_by(user_id)?;
        Ok(link)
    }

    /// Append a link to the end of a section
    #[instrument(skip(self, request))]
    pub async fn create_link(
        &self,
        user_id: Snowflake,
        section_id: Snowflake,
        request: CreateLinkRequest,
    ) -> ServiceResult<LinkResponse> {
        let section = SectionService::new(self.ctx).owned_section(user_id, section_id).await?;

        let mut link = Link::new(
            self.ctx.generate_id(),
            user_id,
            section.id,
            request.text.trim().to_string(),
            request.url,
            0,
        );
        if request.thumbnail_url.is_some() {
            link.set_thumbnail(request.thumbnail_url, request.thumbnail_public_id);
        }

        link.index = self.ctx.link_repo().create(&link).await?;

        info!(user_id = %user_id, link_id = %link.id, "Link created");

        Ok(LinkResponse::from(link))
    }

    #[instrument(skip(self, request))]
    pub async fn update_link(
        &self,
        user_id: Snowflake,
        link_id: Snowflake,
        request: UpdateLinkRequest,
    ) -> ServiceResult<LinkResponse> {
        let mut link = self.owned_link(user_id, link_id).await?;

        if let Some(text) = request.text {
            link.text = text.trim().to_string();
        }
        if let Some(url) = request.url {
            link.url = url;
        }
        if let Some(hidden) = request.hidden {
            link.hidden = hidden;
        }

        let replaced = match (request.thumbnail_url, request.thumbnail_public_id) {
            (Some(url), public_id) => link.set_thumbnail(Some(url), public_id),
            (None, Some(_)) => {
                return Err(ServiceError::validation("thumbnail_public_id requires thumbnail_url"));
            }
            (None, None) if request.remove_thumbnail => link.set_thumbnail(None, None),
            (None, None) => None,
        };

        self.ctx.link_repo().update(&link).await?;
        MediaService::new(self.ctx).discard(replaced.as_deref()).await;

        Ok(LinkResponse::from(link))
    }

    #[instrument(skip(self))]
    pub async fn delete_link(&self, user_id: Snowflake, link_id: Snowflake) -> ServiceResult<()> {
        let link = self.owned_link(user_id, link_id).await?;
        self.ctx.link_repo().delete(&link).await?;
        MediaService::new(self.ctx).discard(link.thumbnail_public_id.as_deref()).await;

        info!(user_id = %user_id, link_id = %link_id, "Link deleted");
        Ok(())
    }

    /// Reorder the links of one section
    #[instrument(skip(self, request))]
    pub async fn reorder_links(
        &self,
        user_id: Snowflake,
        section_id: Snowflake,
        request: ReorderRequest,
    ) -> ServiceResult<Vec<LinkResponse>> {
        let section = SectionService::new(self.ctx).owned_section(user_id, section_id).await?;
        self.ctx.link_repo().reorder(section.id, &request.ids).await?;

        let links = self.ctx.link_repo().find_by_section(section.id).await?;
        Ok(links.iter().map(LinkResponse::from).collect())
    }

    /// Find the link a click on `owner`'s public page refers to
    ///
    /// Hidden links and links of other users are reported as not found.
    #[instrument(skip(self))]
    pub async fn resolve_click_target(&self, owner: Snowflake, link_id: Snowflake) -> ServiceResult<Link> {
        match self.ctx.link_repo().find_by_id(link_id).await? {
            Some(link) if link.user_id == owner && link.is_visible() => Ok(link),
            _ => Err(DomainError::LinkNotFound(link_id).into()),
        }
    }
}
