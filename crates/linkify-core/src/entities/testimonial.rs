//! Testimonial entity - a visitor-submitted review on a profile

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

use super::Owned;

/// Lowest accepted star rating
pub const MIN_RATING: i16 = 1;
/// Highest accepted star rating
pub const MAX_RATING: i16 = 5;

/// Testimonial entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testimonial {
    pub id: Snowflake,
    /// Owner of the profile the testimonial was left on
    pub user_id: Snowflake,
    pub name: String,
    pub email: Option<String>,
    pub rating: i16,
    pub message: String,
    /// Showcased on the public page
    pub should_show: bool,
    pub index: i32,
    pub created_at: DateTime<Utc>,
}

impl Testimonial {
    /// Create a testimonial; new testimonials start hidden
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        name: String,
        email: Option<String>,
        rating: i16,
        message: String,
        index: i32,
    ) -> Result<Self, DomainError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(DomainError::InvalidRating(rating));
        }

        Ok(Self {
            id,
            user_id,
            name,
            email,
            rating,
            message,
            should_show: false,
            index,
            created_at: Utc::now(),
        })
    }
}

impl Owned for Testimonial {
    fn owner_id(&self) -> Snowflake {
        self.user_id
    }
}
