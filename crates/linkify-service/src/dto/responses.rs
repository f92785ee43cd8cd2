//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

use linkify_core::analytics::{AnalyticsRange, DailyPoint};
use linkify_core::entities::{
    ButtonRadius, ButtonVariant, EventKind, IconPlacement, ImageShape, LayoutStyle,
    SocialPlatform, SubscriptionStatus,
};
use linkify_core::{Entitlements, Plan};

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with cursor-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, before: Option<String>, has_more: bool, limit: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta { before, has_more, limit },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Cursor for fetching the next (older) page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Whether more results exist
    pub has_more: bool,
    /// Page size limit used
    pub limit: i64,
}

/// A URL to redirect the browser to
#[derive(Debug, Clone, Serialize)]
pub struct UrlResponse {
    pub url: String,
}

// ============================================================================
// Auth & User Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// Current authenticated user (includes email and plan)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub plan: Plan,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Content Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LinkResponse {
    pub id: String,
    pub section_id: String,
    pub text: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub hidden: bool,
    pub index: i32,
}

/// Section with its links in order
#[derive(Debug, Clone, Serialize)]
pub struct SectionResponse {
    pub id: String,
    pub name: String,
    pub index: i32,
    pub links: Vec<LinkResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialLinkResponse {
    pub id: String,
    pub platform: SocialPlatform,
    pub url: String,
    pub index: i32,
}

// ============================================================================
// Appearance Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ThemeResponse {
    pub background_color: String,
    pub text_color: String,
    pub font: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutResponse {
    pub style: LayoutStyle,
    pub image_shape: ImageShape,
}

#[derive(Debug, Clone, Serialize)]
pub struct ButtonStyleResponse {
    pub variant: ButtonVariant,
    pub radius: ButtonRadius,
    pub background_color: String,
    pub text_color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    pub social_icon_placement: IconPlacement,
    pub hide_branding: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppearanceResponse {
    pub theme: ThemeResponse,
    pub layout: LayoutResponse,
    pub button: ButtonStyleResponse,
    pub settings: SettingsResponse,
}

// ============================================================================
// Testimonial & Form Responses
// ============================================================================

/// Testimonial as the profile owner sees it
#[derive(Debug, Clone, Serialize)]
pub struct TestimonialResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub rating: i16,
    pub message: String,
    pub should_show: bool,
    pub index: i32,
    pub created_at: DateTime<Utc>,
}

/// Testimonial as rendered on the public page (no email)
#[derive(Debug, Clone, Serialize)]
pub struct PublicTestimonialResponse {
    pub id: String,
    pub name: String,
    pub rating: i16,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormResponse {
    /// `None` until the form is first saved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub button_text: String,
    pub collect_phone: bool,
    pub collect_subject: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSubmissionResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Submissions received this calendar month against the plan limit
#[derive(Debug, Clone, Serialize)]
pub struct FormUsageResponse {
    pub plan: Plan,
    pub used: i64,
    /// `None` when unlimited
    pub limit: Option<i64>,
    pub period_start: DateTime<Utc>,
}

// ============================================================================
// Analytics Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RecordEventResponse {
    pub kind: EventKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeseriesResponse {
    pub range: AnalyticsRange,
    pub points: Vec<DailyPoint>,
}

// ============================================================================
// Billing Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub plan: Plan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renews_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    pub entitlements: Entitlements,
}

// ============================================================================
// Public Profile Response
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PublicLinkResponse {
    pub id: String,
    pub text: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicSectionResponse {
    pub id: String,
    pub name: String,
    pub links: Vec<PublicLinkResponse>,
}

/// Everything the public page needs in one document
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfileResponse {
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub sections: Vec<PublicSectionResponse>,
    pub social_links: Vec<SocialLinkResponse>,
    pub testimonials: Vec<PublicTestimonialResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormResponse>,
    pub appearance: AppearanceResponse,
    pub show_branding: bool,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
        }
    }
}
