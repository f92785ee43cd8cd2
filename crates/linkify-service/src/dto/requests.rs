//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Snowflake IDs are accepted as strings or numbers.

use serde::Deserialize;
use validator::Validate;

use linkify_core::entities::{
    ButtonRadius, ButtonVariant, IconPlacement, ImageShape, LayoutStyle, SocialPlatform,
};
use linkify_core::Snowflake;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 30, message = "Username must be 3-30 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Update the current user's profile; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 60, message = "Display name must be at most 60 characters"))]
    pub display_name: Option<String>,

    #[validate(length(max = 300, message = "Bio must be at most 300 characters"))]
    pub bio: Option<String>,

    /// Uploaded image URL; requires `image_public_id`
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    pub image_public_id: Option<String>,

    /// Drop the current image
    #[serde(default)]
    pub remove_image: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeUsernameRequest {
    #[validate(length(min = 3, max = 30, message = "Username must be 3-30 characters"))]
    pub username: String,
}

// ============================================================================
// Section & Link Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSectionRequest {
    #[validate(length(min = 1, max = 60, message = "Section name must be 1-60 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenameSectionRequest {
    #[validate(length(min = 1, max = 60, message = "Section name must be 1-60 characters"))]
    pub name: String,
}

/// New order for a list; must contain every current id exactly once
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReorderRequest {
    #[validate(length(max = 500, message = "Too many ids"))]
    pub ids: Vec<Snowflake>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, max = 100, message = "Link text must be 1-100 characters"))]
    pub text: String,

    #[validate(url(message = "Invalid link URL"))]
    pub url: String,

    #[validate(url(message = "Invalid thumbnail URL"))]
    pub thumbnail_url: Option<String>,

    pub thumbnail_public_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, max = 100, message = "Link text must be 1-100 characters"))]
    pub text: Option<String>,

    #[validate(url(message = "Invalid link URL"))]
    pub url: Option<String>,

    pub hidden: Option<bool>,

    #[validate(url(message = "Invalid thumbnail URL"))]
    pub thumbnail_url: Option<String>,

    pub thumbnail_public_id: Option<String>,

    #[serde(default)]
    pub remove_thumbnail: bool,
}

// ============================================================================
// Social Link Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSocialLinkRequest {
    pub platform: SocialPlatform,

    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSocialLinkRequest {
    pub platform: Option<SocialPlatform>,

    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: Option<String>,
}

// ============================================================================
// Appearance Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateThemeRequest {
    pub background_color: String,
    pub text_color: String,

    #[validate(length(min = 1, max = 50, message = "Font must be 1-50 characters"))]
    pub font: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLayoutRequest {
    pub style: LayoutStyle,
    pub image_shape: ImageShape,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateButtonRequest {
    pub variant: ButtonVariant,
    pub radius: ButtonRadius,
    pub background_color: String,
    pub text_color: String,
}

/// SEO and page settings; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    #[validate(length(max = 70, message = "SEO title must be at most 70 characters"))]
    pub seo_title: Option<String>,

    #[validate(length(max = 160, message = "SEO description must be at most 160 characters"))]
    pub seo_description: Option<String>,

    pub social_icon_placement: Option<IconPlacement>,

    pub hide_branding: Option<bool>,
}

// ============================================================================
// Testimonial Requests
// ============================================================================

/// Visitor-submitted testimonial
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitTestimonialRequest {
    #[validate(length(min = 1, max = 80, message = "Name must be 1-80 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,

    #[validate(length(min = 1, max = 1000, message = "Message must be 1-1000 characters"))]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetVisibilityRequest {
    pub should_show: bool,
}

// ============================================================================
// Form Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertFormRequest {
    #[validate(length(min = 1, max = 80, message = "Title must be 1-80 characters"))]
    pub title: String,

    #[validate(length(max = 300, message = "Description must be at most 300 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 30, message = "Button text must be 1-30 characters"))]
    pub button_text: String,

    #[serde(default)]
    pub collect_phone: bool,

    #[serde(default)]
    pub collect_subject: bool,

    #[serde(default)]
    pub enabled: bool,
}

/// Visitor-submitted contact form response
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitFormRequest {
    #[validate(length(min = 1, max = 80, message = "Name must be 1-80 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 120, message = "Subject must be at most 120 characters"))]
    pub subject: Option<String>,

    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,
}

// ============================================================================
// Analytics Requests
// ============================================================================

/// What the public page reports; views are split into unique/repeat server-side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedKind {
    View,
    Click,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordEventRequest {
    #[validate(length(min = 1, max = 30, message = "Username must be 1-30 characters"))]
    pub username: String,

    pub kind: TrackedKind,

    /// Required for clicks
    pub link_id: Option<Snowflake>,
}

/// `?range=` in days; defaults to 7
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub range: Option<i64>,
}
