//! Testimonial service - visitor reviews and the showcase on the public page

use linkify_core::entities::{Owned, Testimonial, User};
use linkify_core::error::DomainError;
use linkify_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{
    PublicTestimonialResponse, ReorderRequest, SetVisibilityRequest, SubmitTestimonialRequest,
    TestimonialResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct TestimonialService<'a> {
    ctx: &'a ServiceContext,
}

/// Resolve the owner of a public page by slug
pub(crate) async fn profile_owner(ctx: &ServiceContext, username: &str) -> ServiceResult<User> {
    let slug = username.trim().to_ascii_lowercase();
    ctx.user_repo()
        .find_by_username(&slug)
        .await?
        .ok_or_else(|| DomainError::ProfileNotFound(slug).into())
}

impl<'a> TestimonialService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn owned(&self, user_id: Snowflake, id: Snowflake) -> ServiceResult<Testimonial> {
        let testimonial = self
            .ctx
            .testimonial_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::TestimonialNotFound(id))?;
        testimonial.ensure_owned_by(user_id)?;
        Ok(testimonial)
    }

    /// A visitor leaves a testimonial; it stays hidden until the owner shows it
    #[instrument(skip(self, request))]
    pub async fn submit(
        &self,
        username: &str,
        request: SubmitTestimonialRequest,
    ) -> ServiceResult<PublicTestimonialResponse> {
        let owner = profile_owner(self.ctx, username).await?;

        let mut testimonial = Testimonial::new(
            self.ctx.generate_id(),
            owner.id,
            request.name.trim().to_string(),
            request.email.map(|email| email.trim().to_ascii_lowercase()),
            request.rating,
            request.message.trim().to_string(),
            0,
        )?;
        testimonial.index = self.ctx.testimonial_repo().create(&testimonial).await?;

        info!(user_id = %owner.id, testimonial_id = %testimonial.id, "Testimonial received");

        Ok(PublicTestimonialResponse::from(&testimonial))
    }

    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<TestimonialResponse>> {
        let testimonials = self.ctx.testimonial_repo().find_by_user(user_id).await?;
        Ok(testimonials.iter().map(TestimonialResponse::from).collect())
    }

    /// Show or hide a testimonial; showing one counts against the plan limit
    #[instrument(skip(self, request))]
    pub async fn set_visibility(
        &self,
        user_id: Snowflake,
        id: Snowflake,
        request: SetVisibilityRequest,
    ) -> ServiceResult<TestimonialResponse> {
        let mut testimonial = self.owned(user_id, id).await?;
        let plan = self.ctx.current_plan(user_id).await?;

        self.ctx
            .testimonial_repo()
            .set_visibility(&testimonial, request.should_show, plan.entitlements())
            .await?;
        testimonial.should_show = request.should_show;

        Ok(TestimonialResponse::from(testimonial))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Snowflake, id: Snowflake) -> ServiceResult<()> {
        let testimonial = self.owned(user_id, id).await?;
        self.ctx.testimonial_repo().delete(&testimonial).await?;
        Ok(())
    }

    #[instrument(skip(self, request))]
    pub async fn reorder(
        &self,
        user_id: Snowflake,
        request: ReorderRequest,
    ) -> ServiceResult<Vec<TestimonialResponse>> {
        self.ctx.testimonial_repo().reorder(user_id, &request.ids).await?;

        self.list(user_id).await
    }
}
