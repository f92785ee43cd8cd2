//! User entity - an account and the profile it publishes

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    /// Cloudinary public ID of `image_url`, used to delete the asset
    pub image_public_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with an empty profile
    pub fn new(id: Snowflake, email: String, username: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            username,
            display_name: None,
            bio: None,
            image_url: None,
            image_public_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name shown on the public page, falling back to the username
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// Replace the profile image, returning the public ID of the old asset
    pub fn set_image(&mut self, url: Option<String>, public_id: Option<String>) -> Option<String> {
        self.image_url = url;
        self.updated_at = Utc::now();
        std::mem::replace(&mut self.image_public_id, public_id)
    }

    pub fn set_username(&mut self, username: String) {
        self.username = username;
        self.updated_at = Utc::now();
    }
}
