//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
///
/// Codes follow the categories the dashboard client switches on:
/// `NOT_FOUND`, `VALIDATION_ERROR`, `UNAUTHORIZED`, `FORBIDDEN`, `CONFLICT`.
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(Snowflake),

    #[error("Link not found: {0}")]
    LinkNotFound(Snowflake),

    #[error("Social link not found: {0}")]
    SocialLinkNotFound(Snowflake),

    #[error("Testimonial not found: {0}")]
    TestimonialNotFound(Snowflake),

    #[error("Form not found")]
    FormNotFound,

    #[error("Form submission not found: {0}")]
    SubmissionNotFound(Snowflake),

    #[error("No subscription found")]
    SubscriptionNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Username is reserved: {0}")]
    ReservedUsername(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i16),

    #[error("Reorder rejected: {0}")]
    ReorderMismatch(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("You do not own this resource")]
    NotOwner,

    #[error("Plan limit reached: {feature} is limited to {limit}")]
    PlanLimitReached { feature: &'static str, limit: i64 },

    #[error("{0} requires a Pro plan")]
    ProFeature(&'static str),

    #[error("This form is not accepting submissions")]
    FormDisabled,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        if self.is_not_found() {
            "NOT_FOUND"
        } else if self.is_validation() {
            "VALIDATION_ERROR"
        } else if self.is_unauthorized() {
            "UNAUTHORIZED"
        } else if self.is_forbidden() {
            "FORBIDDEN"
        } else if self.is_conflict() {
            "CONFLICT"
        } else {
            match self {
                Self::DatabaseError(_) => "DATABASE_ERROR",
                Self::ExternalServiceError(_) => "EXTERNAL_SERVICE_ERROR",
                _ => "INTERNAL_ERROR",
            }
        }
    }

    /// HTTP status code this error maps to
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_validation() {
            400
        } else if self.is_unauthorized() {
            401
        } else if self.is_forbidden() {
            403
        } else if self.is_conflict() {
            409
        } else {
            500
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ProfileNotFound(_)
                | Self::SectionNotFound(_)
                | Self::LinkNotFound(_)
                | Self::SocialLinkNotFound(_)
                | Self::TestimonialNotFound(_)
                | Self::FormNotFound
                | Self::SubmissionNotFound(_)
                | Self::SubscriptionNotFound
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidUsername(_)
                | Self::ReservedUsername(_)
                | Self::InvalidColor(_)
                | Self::InvalidRating(_)
                | Self::ReorderMismatch(_)
        )
    }

    /// Ownership mismatch between the caller and the resource
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::NotOwner)
    }

    /// Plan gating and disabled features
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self,
            Self::PlanLimitReached { .. } | Self::ProFeature(_) | Self::FormDisabled
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::UsernameTaken(_))
    }
}
