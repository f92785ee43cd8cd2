use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionModel {
    pub id: i64,
    pub user_id: i64,
    pub provider_subscription_id: String,
    pub customer_id: String,
    pub variant_id: String,
    pub status: String,
    pub renews_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub customer_portal_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
