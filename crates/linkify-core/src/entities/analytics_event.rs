//! Analytics event - one page view or link click on a public profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// What happened on the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A repeat view from a visitor who already carries the `viewed-at` cookie
    View,
    /// First view from a visitor without the `viewed-at` cookie
    UniqueView,
    Click,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::UniqueView => "unique_view",
            Self::Click => "click",
        }
    }

    /// Both view kinds count towards total views
    pub fn is_view(self) -> bool {
        matches!(self, Self::View | Self::UniqueView)
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "unique_view" => Ok(Self::UniqueView),
            "click" => Ok(Self::Click),
            other => Err(format!("unknown event kind: {other}")),
        }
    }
}

/// Coarse device class derived from the User-Agent header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    Mobile,
    Tablet,
    Desktop,
    Unknown,
}

impl Device {
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let Some(ua) = user_agent.map(str::to_ascii_lowercase) else {
            return Self::Unknown;
        };

        if ua.is_empty() {
            Self::Unknown
        } else if ua.contains("ipad") || ua.contains("tablet") || (ua.contains("android") && !ua.contains("mobile")) {
            Self::Tablet
        } else if ua.contains("mobi") || ua.contains("iphone") || ua.contains("android") {
            Self::Mobile
        } else if ua.contains("windows") || ua.contains("macintosh") || ua.contains("linux") || ua.contains("cros") {
            Self::Desktop
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
            Self::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Self::Mobile),
            "tablet" => Ok(Self::Tablet),
            "desktop" => Ok(Self::Desktop),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unknown device: {other}")),
        }
    }
}

/// Analytics event entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub id: Snowflake,
    /// Profile owner the event belongs to
    pub user_id: Snowflake,
    pub kind: EventKind,
    /// Clicked link; only set for [`EventKind::Click`]
    pub link_id: Option<Snowflake>,
    /// Referrer host, without scheme or path
    pub referrer: Option<String>,
    pub device: Device,
    pub created_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        kind: EventKind,
        link_id: Option<Snowflake>,
        referrer: Option<&str>,
        device: Device,
    ) -> Self {
        Self {
            id,
            user_id,
            kind,
            link_id: link_id.filter(|_| kind == EventKind::Click),
            referrer: referrer.and_then(referrer_host),
            device,
            created_at: Utc::now(),
        }
    }
}

/// Reduce a Referer header to its host (`https://www.google.com/search` → `google.com`)
pub fn referrer_host(referrer: &str) -> Option<String> {
    let parsed = url::Url::parse(referrer.trim()).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    (!host.is_empty()).then(|| host.to_string())
}
