//! Section entity - a named, orderable group of links

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

use super::Owned;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub name: String,
    pub index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Section {
    pub fn new(id: Snowflake, user_id: Snowflake, name: String, index: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            name,
            index,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}

impl Owned for Section {
    fn owner_id(&self) -> Snowflake {
        self.user_id
    }
}
