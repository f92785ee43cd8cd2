//! Public profile service - everything `/{username}` renders

use tracing::instrument;

use crate::dto::{
    AppearanceResponse, FormResponse, PublicLinkResponse, PublicProfileResponse,
    PublicSectionResponse, PublicTestimonialResponse, SocialLinkResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::section::group_links;
use super::testimonial::profile_owner;

pub struct PublicProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PublicProfileService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve a public page by slug
    ///
    /// Hidden links are dropped, only showcased testimonials are included
    /// and the form appears only while enabled. Branding is shown unless the
    /// owner hid it and is still on a plan that allows that.
    #[instrument(skip(self))]
    pub async fn get_public_profile(&self, username: &str) -> ServiceResult<PublicProfileResponse> {
        let user = profile_owner(self.ctx, username).await?;

        let sections = self.ctx.section_repo().find_by_user(user.id).await?;
        let links = self.ctx.link_repo().find_by_user(user.id).await?;
        let social_links = self.ctx.social_link_repo().find_by_user(user.id).await?;
        let testimonials = self.ctx.testimonial_repo().find_showcased(user.id).await?;
        let form = self.ctx.form_repo().find_by_user(user.id).await?;
        let appearance = self.ctx.appearance_repo().find_by_user(user.id).await?;
        let plan = self.ctx.current_plan(user.id).await?;

        let sections = group_links(sections, links)
            .into_iter()
            .map(|(section, links)| PublicSectionResponse {
                id: section.id.to_string(),
                name: section.name,
                links: links
                    .iter()
                    .filter(|link| link.is_visible())
                    .map(PublicLinkResponse::from)
                    .collect(),
            })
            .collect();

        // A lapsed subscription brings the branding back
        let show_branding = !(appearance.settings.hide_branding && plan.entitlements().hide_branding);

        Ok(PublicProfileResponse {
            display_name: user.display_name().to_string(),
            username: user.username,
            bio: user.bio,
            image_url: user.image_url,
            sections,
            social_links: social_links.iter().map(SocialLinkResponse::from).collect(),
            testimonials: testimonials.iter().map(PublicTestimonialResponse::from).collect(),
            form: form.filter(|f| f.enabled).map(FormResponse::from),
            appearance: AppearanceResponse::from(appearance),
            show_branding,
        })
    }
}
