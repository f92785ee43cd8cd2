//! User handlers
//!
//! Endpoints for the signed-in user's own profile.

use axum::{extract::State, Json};
use linkify_service::dto::{ChangeUsernameRequest, CurrentUserResponse, UpdateProfileRequest};
use linkify_service::services::ProfileService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = ProfileService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Update display name, bio or profile image
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = ProfileService::new(state.service_context());
    let response = service.update_profile(auth.user_id, request).await?;
    Ok(Json(response))
}

/// PUT /users/@me/username
pub async fn change_username(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangeUsernameRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = ProfileService::new(state.service_context());
    let response = service.change_username(auth.user_id, request).await?;
    Ok(Json(response))
}
