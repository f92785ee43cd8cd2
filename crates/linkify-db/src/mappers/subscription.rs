use linkify_core::entities::{Subscription, SubscriptionStatus};
use linkify_core::value_objects::Snowflake;

use crate::models::SubscriptionModel;

impl From<SubscriptionModel> for Subscription {
    fn from(model: SubscriptionModel) -> Self {
        Subscription {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            provider_subscription_id: model.provider_subscription_id,
            customer_id: model.customer_id,
            variant_id: model.variant_id,
            status: model.status.parse().unwrap_or(SubscriptionStatus::Expired),
            renews_at: model.renews_at,
            ends_at: model.ends_at,
            customer_portal_url: model.customer_portal_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
