//! Plan tiers and the limits each one grants

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsRange;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    #[default]
    Free,
    Pro,
}

impl Plan {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
        }
    }

    pub fn is_pro(self) -> bool {
        self == Self::Pro
    }

    pub fn entitlements(self) -> Entitlements {
        match self {
            Self::Free => Entitlements::FREE,
            Self::Pro => Entitlements::PRO,
        }
    }
}

/// Limits for one plan; `None` means unlimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entitlements {
    pub showcased_testimonials: i64,
    pub monthly_submissions: Option<i64>,
    pub max_analytics_range: AnalyticsRange,
    pub hide_branding: bool,
}

impl Entitlements {
    pub const FREE: Self = Self {
        showcased_testimonials: 5,
        monthly_submissions: Some(25),
        max_analytics_range: AnalyticsRange::Week,
        hide_branding: false,
    };

    pub const PRO: Self = Self {
        showcased_testimonials: 30,
        monthly_submissions: None,
        max_analytics_range: AnalyticsRange::Year,
        hide_branding: true,
    };

    /// Allow showcasing one more testimonial when `showcased` are already shown
    pub fn ensure_can_showcase(&self, showcased: i64) -> Result<(), DomainError> {
        if showcased >= self.showcased_testimonials {
            return Err(DomainError::PlanLimitReached {
                feature: "showcased testimonials",
                limit: self.showcased_testimonials,
            });
        }
        Ok(())
    }

    /// Allow one more submission when `this_month` were already received
    pub fn ensure_can_accept_submission(&self, this_month: i64) -> Result<(), DomainError> {
        match self.monthly_submissions {
            Some(limit) if this_month >= limit => Err(DomainError::PlanLimitReached {
                feature: "monthly form submissions",
                limit,
            }),
            _ => Ok(()),
        }
    }

    pub fn ensure_range(&self, range: AnalyticsRange) -> Result<(), DomainError> {
        if range > self.max_analytics_range {
            return Err(DomainError::PlanLimitReached {
                feature: "analytics range in days",
                limit: self.max_analytics_range.days(),
            });
        }
        Ok(())
    }

    pub fn ensure_can_hide_branding(&self) -> Result<(), DomainError> {
        if self.hide_branding {
            Ok(())
        } else {
            Err(DomainError::ProFeature("Hiding Linkify branding"))
        }
    }
}

/// Start of the calendar month (UTC) containing `now`
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let first = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    Utc.from_utc_datetime(&first)
}
