//! Media handlers

use axum::{extract::State, Json};
use linkify_core::traits::UploadSignature;
use linkify_service::services::MediaService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Signed parameters for a direct browser upload to the image host
///
/// POST /media/signature
pub async fn upload_signature(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<UploadSignature>> {
    let service = MediaService::new(state.service_context());
    let signature = service.upload_signature()?;
    Ok(Json(signature))
}
