//! Social link entity - an icon + URL pair in the profile's social bar

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

use super::Owned;

/// Supported social icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    Instagram,
    X,
    Facebook,
    Tiktok,
    Youtube,
    Linkedin,
    Github,
    Twitch,
    Discord,
    Spotify,
    Threads,
    Pinterest,
    Snapchat,
    Whatsapp,
    Telegram,
    Email,
    Website,
}

impl SocialPlatform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::X => "x",
            Self::Facebook => "facebook",
            Self::Tiktok => "tiktok",
            Self::Youtube => "youtube",
            Self::Linkedin => "linkedin",
            Self::Github => "github",
            Self::Twitch => "twitch",
            Self::Discord => "discord",
            Self::Spotify => "spotify",
            Self::Threads => "threads",
            Self::Pinterest => "pinterest",
            Self::Snapchat => "snapchat",
            Self::Whatsapp => "whatsapp",
            Self::Telegram => "telegram",
            Self::Email => "email",
            Self::Website => "website",
        }
    }
}

impl std::str::FromStr for SocialPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "instagram" => Self::Instagram,
            "x" | "twitter" => Self::X,
            "facebook" => Self::Facebook,
            "tiktok" => Self::Tiktok,
            "youtube" => Self::Youtube,
            "linkedin" => Self::Linkedin,
            "github" => Self::Github,
            "twitch" => Self::Twitch,
            "discord" => Self::Discord,
            "spotify" => Self::Spotify,
            "threads" => Self::Threads,
            "pinterest" => Self::Pinterest,
            "snapchat" => Self::Snapchat,
            "whatsapp" => Self::Whatsapp,
            "telegram" => Self::Telegram,
            "email" => Self::Email,
            "website" => Self::Website,
            other => return Err(format!("unknown social platform: {other}")),
        })
    }
}

/// Social link entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub platform: SocialPlatform,
    pub url: String,
    pub index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SocialLink {
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        platform: SocialPlatform,
        url: String,
        index: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            platform,
            url,
            index,
            created_at: now,
            updated_at: now,
        }
    }

    /// URL to render; email entries become `mailto:` links
    pub fn href(&self) -> String {
        if self.platform == SocialPlatform::Email && !self.url.starts_with("mailto:") {
            format!("mailto:{}", self.url)
        } else {
            self.url.clone()
        }
    }
}

impl Owned for SocialLink {
    fn owner_id(&self) -> Snowflake {
        self.user_id
    }
}
