//! Subscription entity - billing state mirrored from LemonSqueezy webhooks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entitlements::Plan;
use crate::value_objects::Snowflake;

/// Subscription status as reported by the billing provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    OnTrial,
    Active,
    Paused,
    PastDue,
    Unpaid,
    Cancelled,
    Expired,
}

impl SubscriptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnTrial => "on_trial",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::PastDue => "past_due",
            Self::Unpaid => "unpaid",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on_trial" => Ok(Self::OnTrial),
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "past_due" => Ok(Self::PastDue),
            "unpaid" => Ok(Self::Unpaid),
            "cancelled" => Ok(Self::Cancelled),
            "expired" => Ok(Self::Expired),
            other => Err(format!("unknown subscription status: {other}")),
        }
    }
}

/// Subscription entity (one per user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub provider_subscription_id: String,
    pub customer_id: String,
    pub variant_id: String,
    pub status: SubscriptionStatus,
    pub renews_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub customer_portal_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Plan the subscription grants at `now`
    ///
    /// A cancelled subscription keeps Pro until its paid period ends.
    pub fn plan_at(&self, now: DateTime<Utc>) -> Plan {
        match self.status {
            SubscriptionStatus::Active | SubscriptionStatus::OnTrial => Plan::Pro,
            SubscriptionStatus::Cancelled if self.ends_at.is_some_and(|end| end > now) => Plan::Pro,
            _ => Plan::Free,
        }
    }
}

/// Plan for an optional subscription row
pub fn plan_for(subscription: Option<&Subscription>, now: DateTime<Utc>) -> Plan {
    subscription.map_or(Plan::Free, |s| s.plan_at(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn subscription(status: SubscriptionStatus, ends_at: Option<DateTime<Utc>>) -> Subscription {
        let now = Utc::now();
        Subscription {
            id: Snowflake::new(1),
            user_id: Snowflake::new(2),
            provider_subscription_id: "sub_1".into(),
            customer_id: "cus_1".into(),
            variant_id: "var_1".into(),
            status,
            renews_at: None,
            ends_at,
            customer_portal_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_active_and_trial_are_pro() {
        let now = Utc::now();
        assert_eq!(subscription(SubscriptionStatus::Active, None).plan_at(now), Plan::Pro);
        assert_eq!(subscription(SubscriptionStatus::OnTrial, None).plan_at(now), Plan::Pro);
    }

    #[test]
    fn test_cancelled_keeps_pro_until_period_end() {
        let now = Utc::now();
        let future = subscription(SubscriptionStatus::Cancelled, Some(now + Duration::days(3)));
        let past = subscription(SubscriptionStatus::Cancelled, Some(now - Duration::days(1)));
        assert_eq!(future.plan_at(now), Plan::Pro);
        assert_eq!(past.plan_at(now), Plan::Free);
    }

    #[test]
    fn test_other_statuses_are_free() {
        let now = Utc::now();
        for status in [
            SubscriptionStatus::Expired,
            SubscriptionStatus::PastDue,
            SubscriptionStatus::Paused,
            SubscriptionStatus::Unpaid,
        ] {
            assert_eq!(subscription(status, None).plan_at(now), Plan::Free);
        }
        assert_eq!(plan_for(None, now), Plan::Free);
    }
}
