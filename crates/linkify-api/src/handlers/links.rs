//! Link handlers

use axum::{extract::State, Json};
use linkify_service::dto::{CreateLinkRequest, LinkResponse, ReorderRequest, UpdateLinkRequest};
use linkify_service::services::LinkService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Append a link to a section
///
/// POST /sections/{section_id}/links
pub async fn create_link(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(section_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateLinkRequest>,
) -> ApiResult<Created<Json<LinkResponse>>> {
    let service = LinkService::new(state.service_context());
    let link = service.create_link(auth.user_id, section_id, request).await?;
    Ok(Created(Json(link)))
}

/// PUT /sections/{section_id}/links/order
pub async fn reorder_links(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(section_id): IdPath,
    ValidatedJson(request): ValidatedJson<ReorderRequest>,
) -> ApiResult<Json<Vec<LinkResponse>>> {
    let service = LinkService::new(state.service_context());
    let links = service.reorder_links(auth.user_id, section_id, request).await?;
    Ok(Json(links))
}

/// Update text, url, visibility or thumbnail
///
/// PATCH /links/{link_id}
pub async fn update_link(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(link_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateLinkRequest>,
) -> ApiResult<Json<LinkResponse>> {
    let service = LinkService::new(state.service_context());
    let link = service.update_link(auth.user_id, link_id, request).await?;
    Ok(Json(link))
}

/// DELETE /links/{link_id}
pub async fn delete_link(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(link_id): IdPath,
) -> ApiResult<NoContent> {
    let service = LinkService::new(state.service_context());
    service.delete_link(auth.user_id, link_id).await?;
    Ok(NoContent)
}
