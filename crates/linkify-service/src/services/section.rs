//! Section service - named groups of links on the profile

use std::collections::HashMap;

use linkify_core::entities::{Link, Owned, Section};
use linkify_core::error::DomainError;
use linkify_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{
    CreateSectionRequest, LinkResponse, RenameSectionRequest, ReorderRequest, SectionResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::media::MediaService;

pub struct SectionService<'a> {
    ctx: &'a ServiceContext,
}

/// Attach links to their sections, keeping both orders
pub(crate) fn group_links(sections: Vec<Section>, links: Vec<Link>) -> Vec<(Section, Vec<Link>)> {
    let mut by_section: HashMap<Snowflake, Vec<Link>> = HashMap::new();
    for link in links {
        by_section.entry(link.section_id).or_default().push(link);
    }

    sections
        .into_iter()
        .map(|section| {
            let mut links = by_section.remove(&section.id).unwrap_or_default();
            links.sort_by_key(|link| link.index);
            (section, links)
        })
        .collect()
}

fn to_response(section: Section, links: &[Link]) -> SectionResponse {
    SectionResponse {
        id: section.id.to_string(),
        name: section.name,
        index: section.index,
        links: links.iter().map(LinkResponse::from).collect(),
    }
}

impl<'a> SectionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a section and check the caller owns it
    pub(crate) async fn owned_section(&self, user_id: Snowflake, section_id: Snowflake) -> ServiceResult<Section> {
        let section = self
            .ctx
            .section_repo()
            .find_by_id(section_id)
            .await?
            .ok_or(DomainError::SectionNotFound(section_id))?;
        section.ensure_owned_by(user_id)?;
        Ok(section)
    }

    /// All sections with their links, in display order
    #[instrument(skip(self))]
    pub async fn list_sections(&self, user_id: Snowflake) -> ServiceResult<Vec<SectionResponse>> {
        let sections = self.ctx.section_repo().find_by_user(user_id).await?;
        let links = self.ctx.link_repo().find_by_user(user_id).await?;

        Ok(group_links(sections, links)
            .into_iter()
            .map(|(section, links)| to_response(section, &links))
            .collect())
    }

    #[instrument(skip(self, request))]
    pub async fn create_section(
        &self,
        user_id: Snowflake,
        request: CreateSectionRequest,
    ) -> ServiceResult<SectionResponse> {
        let mut section = Section::new(self.ctx.generate_id(), user_id, request.name.trim().to_string(), 0);
        section.index = self.ctx.section_repo().create(&section).await?;

        info!(user_id = %user_id, section_id = %section.id, "Section created");

        Ok(to_response(section, &[]))
    }

    #[instrument(skip(self, request))]
    pub async fn rename_section(
        &self,
        user_id: Snowflake,
        section_id: Snowflake,
        request: RenameSectionRequest,
    ) -> ServiceResult<SectionResponse> {
        let mut section = self.owned_section(user_id, section_id).await?;
        section.rename(request.name.trim().to_string());
        self.ctx.section_repo().update(&section).await?;

        let links = self.ctx.link_repo().find_by_section(section_id).await?;
        Ok(to_response(section, &links))
    }

    /// Delete a section, its links and their thumbnails
    #[instrument(skip(self))]
    pub async fn delete_section(&self, user_id: Snowflake, section_id: Snowflake) -> ServiceResult<()> {
        let section = self.owned_section(user_id, section_id).await?;
        let links = self.ctx.link_repo().find_by_section(section_id).await?;

        self.ctx.section_repo().delete(&section).await?;

        let thumbnail_ids: Vec<&str> = links.iter().filter_map(|link| link.thumbnail_public_id.as_deref()).collect();
        MediaService::new(self.ctx).discard_all(thumbnail_ids).await;

        info!(user_id = %user_id, section_id = %section_id, links = links.len(), "Section deleted");
        Ok(())
    }

    #[instrument(skip(self, request))]
    pub async fn reorder_sections(
        &self,
        user_id: Snowflake,
        request: ReorderRequest,
    ) -> ServiceResult<Vec<SectionResponse>> {
        self.ctx.section_repo().reorder(user_id, &request.ids).await?;

        self.list_sections(user_id).await
    }
}
