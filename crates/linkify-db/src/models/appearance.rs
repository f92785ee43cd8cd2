//! Appearance database models (one row per user in each table)

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ThemeModel {
    pub user_id: i64,
    pub background_color: String,
    pub text_color: String,
    pub font: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct LayoutModel {
    pub user_id: i64,
    pub style: String,
    pub image_shape: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ButtonStyleModel {
    pub user_id: i64,
    pub variant: String,
    pub radius: String,
    pub background_color: String,
    pub text_color: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct SettingsModel {
    pub user_id: i64,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub social_icon_placement: String,
    pub hide_branding: bool,
    pub updated_at: DateTime<Utc>,
}
