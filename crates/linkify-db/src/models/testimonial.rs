use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TestimonialModel {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub rating: i16,
    pub message: String,
    pub should_show: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}
