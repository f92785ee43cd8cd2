//! Social link handlers
//!
//! Endpoints for the platform icons shown on the public page.

use axum::{extract::State, Json};
use linkify_service::dto::{
    CreateSocialLinkRequest, ReorderRequest, SocialLinkResponse, UpdateSocialLinkRequest,
};
use linkify_service::services::SocialLinkService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /social-links
pub async fn list_social_links(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<SocialLinkResponse>>> {
    let service = SocialLinkService::new(state.service_context());
    let links = service.list(auth.user_id).await?;
    Ok(Json(links))
}

/// POST /social-links
pub async fn create_social_link(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateSocialLinkRequest>,
) -> ApiResult<Created<Json<SocialLinkResponse>>> {
    let service = SocialLinkService::new(state.service_context());
    let link = service.create(auth.user_id, request).await?;
    Ok(Created(Json(link)))
}

/// PATCH /social-links/{id}
pub async fn update_social_link(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateSocialLinkRequest>,
) -> ApiResult<Json<SocialLinkResponse>> {
    let service = SocialLinkService::new(state.service_context());
    let link = service.update(auth.user_id, id, request).await?;
    Ok(Json(link))
}

/// DELETE /social-links/{id}
pub async fn delete_social_link(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = SocialLinkService::new(state.service_context());
    service.delete(auth.user_id, id).await?;
    Ok(NoContent)
}

/// PUT /social-links/order
pub async fn reorder_social_links(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ReorderRequest>,
) -> ApiResult<Json<Vec<SocialLinkResponse>>> {
    let service = SocialLinkService::new(state.service_context());
    let links = service.reorder(auth.user_id, request).await?;
    Ok(Json(links))
}
