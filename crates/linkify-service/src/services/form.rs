//! Form service - the contact form and its inbox

use chrono::Utc;
use linkify_core::entities::{Form, FormSubmission, Owned};
use linkify_core::entitlements::month_start;
use linkify_core::error::DomainError;
use linkify_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{
    FormResponse, FormSubmissionResponse, FormUsageResponse, PaginatedResponse,
    SubmitFormRequest, UpsertFormRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::testimonial::profile_owner;

pub struct FormService<'a> {
    ctx: &'a ServiceContext,
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<'a> FormService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The user's form, or the unsaved defaults when none exists yet
    #[instrument(skip(self))]
    pub async fn get_form(&self, user_id: Snowflake) -> ServiceResult<FormResponse> {
        match self.ctx.form_repo().find_by_user(user_id).await? {
            Some(form) => Ok(FormResponse::from(form)),
            None => {
                let mut response = FormResponse::from(Form::new(Snowflake::default(), user_id));
                response.id = None;
                Ok(response)
            }
        }
    }

    #[instrument(skip(self, request))]
    pub async fn upsert_form(
        &self,
        user_id: Snowflake,
        request: UpsertFormRequest,
    ) -> ServiceResult<FormResponse> {
        let mut form = match self.ctx.form_repo().find_by_user(user_id).await? {
            Some(form) => form,
            None => Form::new(self.ctx.generate_id(), user_id),
        };

        form.title = request.title.trim().to_string();
        form.description = optional_text(request.description);
        form.button_text = request.button_text.trim().to_string();
        form.collect_phone = request.collect_phone;
        form.collect_subject = request.collect_subject;
        form.enabled = request.enabled;
        form.updated_at = Utc::now();

        self.ctx.form_repo().upsert(&form).await?;

        info!(user_id = %user_id, enabled = form.enabled, "Form saved");

        Ok(FormResponse::from(form))
    }

    /// A visitor submits the form on a public page
    ///
    /// Disabled forms reject everything; Free plans accept a fixed number of
    /// submissions per calendar month.
    #[instrument(skip(self, request))]
    pub async fn submit(
        &self,
        username: &str,
        request: SubmitFormRequest,
    ) -> ServiceResult<FormSubmissionResponse> {
        let owner = profile_owner(self.ctx, username).await?;
        let form = self
            .ctx
            .form_repo()
            .find_by_user(owner.id)
            .await?
            .ok_or(DomainError::FormNotFound)?;

        if !form.enabled {
            return Err(DomainError::FormDisabled.into());
        }

        let this_month = self
            .ctx
            .form_repo()
            .count_submissions_since(owner.id, month_start(Utc::now()))
            .await?;
        let plan = self.ctx.current_plan(owner.id).await?;
        plan.entitlements().ensure_can_accept_submission(this_month)?;

        let submission = FormSubmission::for_form(
            self.ctx.generate_id(),
            &form,
            request.name.trim().to_string(),
            request.email.trim().to_string(),
            optional_text(request.phone),
            optional_text(request.subject),
            request.message.trim().to_string(),
        );
        self.ctx.form_repo().create_submission(&submission).await?;

        info!(user_id = %owner.id, submission_id = %submission.id, "Form submission received");

        Ok(FormSubmissionResponse::from(submission))
    }

    /// Newest submissions first, paged by id
    #[instrument(skip(self))]
    pub async fn list_submissions(
        &self,
        user_id: Snowflake,
        before: Option<Snowflake>,
        limit: i64,
    ) -> ServiceResult<PaginatedResponse<FormSubmissionResponse>> {
        let mut submissions = self
            .ctx
            .form_repo()
            .find_submissions(user_id, before, limit + 1)
            .await?;

        let has_more = submissions.len() as i64 > limit;
        submissions.truncate(usize::try_from(limit).unwrap_or_default());

        let cursor = has_more
            .then(|| submissions.last().map(|s| s.id.to_string()))
            .flatten();

        Ok(PaginatedResponse::new(
            submissions.iter().map(FormSubmissionResponse::from).collect(),
            cursor,
            has_more,
            limit,
        ))
    }

    #[instrument(skip(self))]
    pub async fn delete_submission(&self, user_id: Snowflake, id: Snowflake) -> ServiceResult<()> {
        let submission = self
            .ctx
            .form_repo()
            .find_submission(id)
            .await?
            .ok_or(DomainError::SubmissionNotFound(id))?;
        submission.ensure_owned_by(user_id)?;

        self.ctx.form_repo().delete_submission(id).await?;
        Ok(())
    }

    /// Submissions received this month against the plan allowance
    #[instrument(skip(self))]
    pub async fn usage(&self, user_id: Snowflake) -> ServiceResult<FormUsageResponse> {
        let period_start = month_start(Utc::now());
        let used = self
            .ctx
            .form_repo()
            .count_submissions_since(user_id, period_start)
            .await?;
        let plan = self.ctx.current_plan(user_id).await?;

        Ok(FormUsageResponse {
            plan,
            used,
            limit: plan.entitlements().monthly_submissions,
            period_start,
        })
    }
}
