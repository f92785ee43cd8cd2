//! Contact form handlers (owner side)

use axum::{extract::State, Json};
use linkify_service::dto::{
    FormResponse, FormSubmissionResponse, FormUsageResponse, PaginatedResponse, UpsertFormRequest,
};
use linkify_service::services::FormService;

use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Current form configuration, or the defaults if none was saved
///
/// GET /form
pub async fn get_form(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<FormResponse>> {
    let service = FormService::new(state.service_context());
    let form = service.get_form(auth.user_id).await?;
    Ok(Json(form))
}

/// PUT /form
pub async fn upsert_form(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpsertFormRequest>,
) -> ApiResult<Json<FormResponse>> {
    let service = FormService::new(state.service_context());
    let form = service.upsert_form(auth.user_id, request).await?;
    Ok(Json(form))
}

/// Submissions newest first
///
/// GET /form/submissions?before={id}&limit={n}
pub async fn list_submissions(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<FormSubmissionResponse>>> {
    let service = FormService::new(state.service_context());
    let page = service
        .list_submissions(auth.user_id, pagination.before, pagination.limit)
        .await?;
    Ok(Json(page))
}

/// DELETE /form/submissions/{id}
pub async fn delete_submission(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = FormService::new(state.service_context());
    service.delete_submission(auth.user_id, id).await?;
    Ok(NoContent)
}

/// GET /form/usage
pub async fn get_usage(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<FormUsageResponse>> {
    let service = FormService::new(state.service_context());
    let usage = service.usage(auth.user_id).await?;
    Ok(Json(usage))
}
