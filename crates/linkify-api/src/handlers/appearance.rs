//! Appearance handlers
//!
//! Theme, layout, button style and page settings.

use axum::{extract::State, Json};
use linkify_service::dto::{
    AppearanceResponse, SettingsResponse, UpdateButtonRequest, UpdateLayoutRequest,
    UpdateSettingsRequest, UpdateThemeRequest,
};
use linkify_service::services::AppearanceService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /appearance
pub async fn get_appearance(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<AppearanceResponse>> {
    let service = AppearanceService::new(state.service_context());
    let appearance = service.get_appearance(auth.user_id).await?;
    Ok(Json(appearance))
}

/// PUT /appearance/theme
pub async fn update_theme(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateThemeRequest>,
) -> ApiResult<Json<AppearanceResponse>> {
    let service = AppearanceService::new(state.service_context());
    let appearance = service.update_theme(auth.user_id, request).await?;
    Ok(Json(appearance))
}

/// PUT /appearance/layout
pub async fn update_layout(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateLayoutRequest>,
) -> ApiResult<Json<AppearanceResponse>> {
    let service = AppearanceService::new(state.service_context());
    let appearance = service.update_layout(auth.user_id, request).await?;
    Ok(Json(appearance))
}

/// PUT /appearance/button
pub async fn update_button(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateButtonRequest>,
) -> ApiResult<Json<AppearanceResponse>> {
    let service = AppearanceService::new(state.service_context());
    let appearance = service.update_button(auth.user_id, request).await?;
    Ok(Json(appearance))
}

/// GET /api/v1/settings
pub async fn get_settings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<SettingsResponse>> {
    let service = AppearanceService::new(state.service_context());
    let settings = service.get_settings(auth.user_id).await?;
    Ok(Json(settings))
}

/// Partial update of SEO fields, icon placement and branding
///
/// POST /api/settings
pub async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateSettingsRequest>,
) -> ApiResult<Json<SettingsResponse>> {
    let service = AppearanceService::new(state.service_context());
    let settings = service.update_settings(auth.user_id, request).await?;
    Ok(Json(settings))
}
