//! Public handlers
//!
//! Unauthenticated endpoints used by visitors of a profile page.

use axum::{
    extract::{Path, State},
    Json,
};
use linkify_service::dto::{
    FormSubmissionResponse, PublicProfileResponse, PublicTestimonialResponse, SubmitFormRequest,
    SubmitTestimonialRequest,
};
use linkify_service::services::{FormService, PublicProfileService, TestimonialService};

use crate::extractors::ValidatedJson;
use crate::middleware::SubmissionPermit;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /{username}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<PublicProfileResponse>> {
    let service = PublicProfileService::new(state.service_context());
    let profile = service.get_public_profile(&username).await?;
    Ok(Json(profile))
}

/// Leave a testimonial; hidden until the owner showcases it
///
/// POST /api/v1/public/{username}/testimonials
pub async fn submit_testimonial(
    State(state): State<AppState>,
    _permit: SubmissionPermit,
    Path(username): Path<String>,
    ValidatedJson(request): ValidatedJson<SubmitTestimonialRequest>,
) -> ApiResult<Created<Json<PublicTestimonialResponse>>> {
    let service = TestimonialService::new(state.service_context());
    let testimonial = service.submit(&username, request).await?;
    Ok(Created(Json(testimonial)))
}

/// POST /api/v1/public/{username}/form
pub async fn submit_form(
    State(state): State<AppState>,
    _permit: SubmissionPermit,
    Path(username): Path<String>,
    ValidatedJson(request): ValidatedJson<SubmitFormRequest>,
) -> ApiResult<Created<Json<FormSubmissionResponse>>> {
    let service = FormService::new(state.service_context());
    let submission = service.submit(&username, request).await?;
    Ok(Created(Json(submission)))
}
