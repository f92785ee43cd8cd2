//! Link and social link database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct LinkModel {
    pub id: i64,
    pub user_id: i64,
    pub section_id: i64,
    pub text: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub thumbnail_public_id: Option<String>,
    pub hidden: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct SocialLinkModel {
    pub id: i64,
    pub user_id: i64,
    pub platform: String,
    pub url: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
