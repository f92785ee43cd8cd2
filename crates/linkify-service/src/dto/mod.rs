//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AnalyticsQuery, ChangeUsernameRequest, CreateLinkRequest, CreateSectionRequest,
    CreateSocialLinkRequest, LoginRequest, RecordEventRequest, RefreshTokenRequest,
    RegisterRequest, RenameSectionRequest, ReorderRequest, SetVisibilityRequest,
    SubmitFormRequest, SubmitTestimonialRequest, TrackedKind, UpdateButtonRequest,
    UpdateLayoutRequest, UpdateLinkRequest, UpdateProfileRequest, UpdateSettingsRequest,
    UpdateSocialLinkRequest, UpdateThemeRequest, UpsertFormRequest,
};

pub use responses::{
    AppearanceResponse, AuthResponse, ButtonStyleResponse, CurrentUserResponse, FormResponse,
    FormSubmissionResponse, FormUsageResponse, HealthResponse, LayoutResponse, LinkResponse,
    PaginatedResponse, PaginationMeta, PublicLinkResponse, PublicProfileResponse,
    PublicSectionResponse, PublicTestimonialResponse, ReadinessResponse, RecordEventResponse,
    SectionResponse, SettingsResponse, SocialLinkResponse, SubscriptionResponse,
    TestimonialResponse, ThemeResponse, TimeseriesResponse, UrlResponse,
};
