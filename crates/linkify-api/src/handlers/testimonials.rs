//! Testimonial handlers (owner side)

use axum::{extract::State, Json};
use linkify_service::dto::{ReorderRequest, SetVisibilityRequest, TestimonialResponse};
use linkify_service::services::TestimonialService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// GET /testimonials
pub async fn list_testimonials(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<TestimonialResponse>>> {
    let service = TestimonialService::new(state.service_context());
    let testimonials = service.list(auth.user_id).await?;
    Ok(Json(testimonials))
}

/// Showcase or hide a testimonial on the public page
///
/// PUT /testimonials/{id}/visibility
pub async fn set_visibility(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<SetVisibilityRequest>,
) -> ApiResult<Json<TestimonialResponse>> {
    let service = TestimonialService::new(state.service_context());
    let testimonial = service.set_visibility(auth.user_id, id, request).await?;
    Ok(Json(testimonial))
}

/// DELETE /testimonials/{id}
pub async fn delete_testimonial(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = TestimonialService::new(state.service_context());
    service.delete(auth.user_id, id).await?;
    Ok(NoContent)
}

/// PUT /testimonials/order
pub async fn reorder_testimonials(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ReorderRequest>,
) -> ApiResult<Json<Vec<TestimonialResponse>>> {
    let service = TestimonialService::new(state.service_context());
    let testimonials = service.reorder(auth.user_id, request).await?;
    Ok(Json(testimonials))
}
