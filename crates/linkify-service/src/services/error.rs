//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use linkify_common::AppError;
use linkify_core::DomainError;
use thiserror::Error;

/// Failure of a service operation
///
/// Domain rule violations and application errors keep their own codes;
/// `Validation` covers request checks that have no domain variant, such as
/// a malformed social URL.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    App(AppError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => e.status_code(),
            Self::App(e) => e.status_code(),
            Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Code for the JSON error body
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        // Domain errors surfaced through AppError keep their own mapping
        match err {
            AppError::Domain(e) => Self::Domain(e),
            other => Self::App(other),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use linkify_core::Snowflake;

    use super::*;

    #[test]
    fn test_domain_errors_keep_their_status() {
        let err = ServiceError::from(DomainError::NotOwner);
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.error_code(), "UNAUTHORIZED");

        let err = ServiceError::from(DomainError::PlanLimitReached { feature: "showcased testimonials", limit: 5 });
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "FORBIDDEN");
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("Invalid email format");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_app_error_unwraps_domain() {
        let err = ServiceError::from(AppError::Domain(DomainError::SectionNotFound(Snowflake::new(3))));
        assert!(matches!(err, ServiceError::Domain(_)));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_bad_signature_is_forbidden() {
        let err = ServiceError::from(AppError::InvalidSignature);
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::internal("boom").into();
        assert_eq!(app_err.status_code(), 500);
        let app_err: AppError = ServiceError::from(DomainError::FormNotFound).into();
        assert_eq!(app_err.status_code(), 404);
    }
}
