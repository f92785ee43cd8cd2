//! Link entity - a call-to-action entry inside a section

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

use super::Owned;

/// Link entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub section_id: Snowflake,
    pub text: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub thumbnail_public_id: Option<String>,
    /// Hidden links stay in the dashboard but never reach the public page
    pub hidden: bool,
    pub index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        section_id: Snowflake,
        text: String,
        url: String,
        index: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            section_id,
            text,
            url,
            thumbnail_url: None,
            thumbnail_public_id: None,
            hidden: false,
            index,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    /// Replace the thumbnail, returning the public ID of the old asset
    pub fn set_thumbnail(
        &mut self,
        url: Option<String>,
        public_id: Option<String>,
    ) -> Option<String> {
        self.thumbnail_url = url;
        self.updated_at = Utc::now();
        std::mem::replace(&mut self.thumbnail_public_id, public_id)
    }
}

impl Owned for Link {
    fn owner_id(&self) -> Snowflake {
        self.user_id
    }
}
