//! Analytics handlers
//!
//! Event capture from public pages and the dashboard aggregates.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use linkify_core::analytics::{LinkStat, ReferrerStat, Summary};
use linkify_core::entities::EventKind;
use linkify_service::dto::{AnalyticsQuery, RecordEventRequest, RecordEventResponse, TimeseriesResponse};
use linkify_service::services::AnalyticsService;

use crate::extractors::{viewed_cookie, AuthUser, ValidatedJson, Visitor};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Record a view or click
///
/// The first view from a browser is stored as a unique view and answered
/// with the `viewed-at` cookie.
///
/// POST /api/analytics
pub async fn record_event(
    State(state): State<AppState>,
    Visitor { jar, context }: Visitor,
    ValidatedJson(request): ValidatedJson<RecordEventRequest>,
) -> ApiResult<(CookieJar, Created<Json<RecordEventResponse>>)> {
    let service = AnalyticsService::new(state.service_context());
    let response = service.record(request, context).await?;

    let jar = if response.kind == EventKind::UniqueView {
        jar.add(viewed_cookie(state.config().analytics.cookie_max_age))
    } else {
        jar
    };

    Ok((jar, Created(Json(response))))
}

fn range_query(query: Result<Query<AnalyticsQuery>, QueryRejection>) -> ApiResult<AnalyticsQuery> {
    query
        .map(|Query(q)| q)
        .map_err(|e| ApiError::invalid_query(e.body_text()))
}

/// GET /analytics/summary?range={days}
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> ApiResult<Json<Summary>> {
    let service = AnalyticsService::new(state.service_context());
    let summary = service.summary(auth.user_id, range_query(query)?).await?;
    Ok(Json(summary))
}

/// GET /analytics/timeseries?range={days}
pub async fn timeseries(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> ApiResult<Json<TimeseriesResponse>> {
    let service = AnalyticsService::new(state.service_context());
    let series = service.timeseries(auth.user_id, range_query(query)?).await?;
    Ok(Json(series))
}

/// GET /analytics/links?range={days}
pub async fn top_links(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<LinkStat>>> {
    let service = AnalyticsService::new(state.service_context());
    let links = service.top_links(auth.user_id, range_query(query)?).await?;
    Ok(Json(links))
}

/// GET /analytics/referrers?range={days}
pub async fn top_referrers(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ReferrerStat>>> {
    let service = AnalyticsService::new(state.service_context());
    let referrers = service.top_referrers(auth.user_id, range_query(query)?).await?;
    Ok(Json(referrers))
}
