//! Section handlers
//!
//! Endpoints for the titled groups that hold links.

use axum::{extract::State, Json};
use linkify_service::dto::{CreateSectionRequest, RenameSectionRequest, ReorderRequest, SectionResponse};
use linkify_service::services::SectionService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List sections with their links, in display order
///
/// GET /sections
pub async fn list_sections(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<SectionResponse>>> {
    let service = SectionService::new(state.service_context());
    let sections = service.list_sections(auth.user_id).await?;
    Ok(Json(sections))
}

/// POST /sections
pub async fn create_section(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateSectionRequest>,
) -> ApiResult<Created<Json<SectionResponse>>> {
    let service = SectionService::new(state.service_context());
    let section = service.create_section(auth.user_id, request).await?;
    Ok(Created(Json(section)))
}

/// PATCH /sections/{section_id}
pub async fn rename_section(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(section_id): IdPath,
    ValidatedJson(request): ValidatedJson<RenameSectionRequest>,
) -> ApiResult<Json<SectionResponse>> {
    let service = SectionService::new(state.service_context());
    let section = service.rename_section(auth.user_id, section_id, request).await?;
    Ok(Json(section))
}

/// Delete a section together with its links
///
/// DELETE /sections/{section_id}
pub async fn delete_section(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(section_id): IdPath,
) -> ApiResult<NoContent> {
    let service = SectionService::new(state.service_context());
    service.delete_section(auth.user_id, section_id).await?;
    Ok(NoContent)
}

/// PUT /sections/order
pub async fn reorder_sections(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ReorderRequest>,
) -> ApiResult<Json<Vec<SectionResponse>>> {
    let service = SectionService::new(state.service_context());
    let sections = service.reorder_sections(auth.user_id, request).await?;
    Ok(Json(sections))
}
