//! PostgreSQL implementation of SubscriptionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use linkify_core::entities::Subscription;
use linkify_core::traits::{RepoResult, SubscriptionRepository};
use linkify_core::value_objects::Snowflake;

use crate::models::SubscriptionModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Subscription>> {
        let result = sqlx::query_as::<_, SubscriptionModel>(
            r"
            SELECT id, user_id, provider_subscription_id, customer_id, variant_id, status,
                   renews_at, ends_at, customer_portal_url, created_at, updated_at
            FROM subscriptions WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Subscription::from))
    }

    #[instrument(skip(self, subscription), fields(user_id = %subscription.user_id, status = subscription.status.as_str()))]
    async fn upsert(&self, subscription: &Subscription) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO subscriptions (id, user_id, provider_subscription_id, customer_id,
                                       variant_id, status, renews_at, ends_at,
                                       customer_portal_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET provider_subscription_id = EXCLUDED.provider_subscription_id,
                customer_id = EXCLUDED.customer_id,
                variant_id = EXCLUDED.variant_id,
                status = EXCLUDED.status,
                renews_at = EXCLUDED.renews_at,
                ends_at = EXCLUDED.ends_at,
                customer_portal_url = EXCLUDED.customer_portal_url,
                updated_at = NOW()
            ",
        )
        .bind(subscription.id.into_inner())
        .bind(subscription.user_id.into_inner())
        .bind(&subscription.provider_subscription_id)
        .bind(&subscription.customer_id)
        .bind(&subscription.variant_id)
        .bind(subscription.status.as_str())
        .bind(subscription.renews_at)
        .bind(subscription.ends_at)
        .bind(&subscription.customer_portal_url)
        .bind(subscription.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
