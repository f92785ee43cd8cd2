//! Appearance rows - per-user configuration for how the public page renders

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Page colors and font
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub user_id: Snowflake,
    pub background_color: String,
    pub text_color: String,
    pub font: String,
    pub updated_at: DateTime<Utc>,
}

impl Theme {
    pub fn default_for(user_id: Snowflake) -> Self {
        Self {
            user_id,
            background_color: "#ffffff".to_string(),
            text_color: "#1a202c".to_string(),
            font: "Inter".to_string(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStyle {
    #[default]
    Classic,
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImageShape {
    #[default]
    Circle,
    Rounded,
    Square,
}

/// Page layout and avatar shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub user_id: Snowflake,
    pub style: LayoutStyle,
    pub image_shape: ImageShape,
    pub updated_at: DateTime<Utc>,
}

impl Layout {
    pub fn default_for(user_id: Snowflake) -> Self {
        Self {
            user_id,
            style: LayoutStyle::default(),
            image_shape: ImageShape::default(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ButtonVariant {
    #[default]
    Fill,
    Outline,
    HardShadow,
    SoftShadow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ButtonRadius {
    None,
    #[default]
    Rounded,
    Full,
}

/// Link button styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonStyle {
    pub user_id: Snowflake,
    pub variant: ButtonVariant,
    pub radius: ButtonRadius,
    pub background_color: String,
    pub text_color: String,
    pub updated_at: DateTime<Utc>,
}

impl ButtonStyle {
    pub fn default_for(user_id: Snowflake) -> Self {
        Self {
            user_id,
            variant: ButtonVariant::default(),
            radius: ButtonRadius::default(),
            background_color: "#1a202c".to_string(),
            text_color: "#ffffff".to_string(),
            updated_at: Utc::now(),
        }
    }
}

/// Where social icons render relative to the links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconPlacement {
    #[default]
    Top,
    Bottom,
}

/// SEO and page-level settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub user_id: Snowflake,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub social_icon_placement: IconPlacement,
    /// Hide the "Made with Linkify" footer (Pro only)
    pub hide_branding: bool,
    pub updated_at: DateTime<Utc>,
}

impl Settings {
    pub fn default_for(user_id: Snowflake) -> Self {
        Self {
            user_id,
            seo_title: None,
            seo_description: None,
            social_icon_placement: IconPlacement::default(),
            hide_branding: false,
            updated_at: Utc::now(),
        }
    }
}

/// All appearance rows for a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appearance {
    pub theme: Theme,
    pub layout: Layout,
    pub button: ButtonStyle,
    pub settings: Settings,
}

impl Appearance {
    pub fn default_for(user_id: Snowflake) -> Self {
        Self {
            theme: Theme::default_for(user_id),
            layout: Layout::default_for(user_id),
            button: ButtonStyle::default_for(user_id),
            settings: Settings::default_for(user_id),
        }
    }
}

macro_rules! str_enum {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    other => Err(format!("unknown {}: {other}", stringify!($ty))),
                }
            }
        }
    };
}

str_enum!(LayoutStyle { Classic => "classic", Card => "card" });
str_enum!(ImageShape { Circle => "circle", Rounded => "rounded", Square => "square" });
str_enum!(ButtonVariant {
    Fill => "fill",
    Outline => "outline",
    HardShadow => "hard_shadow",
    SoftShadow => "soft_shadow",
});
str_enum!(ButtonRadius { None => "none", Rounded => "rounded", Full => "full" });
str_enum!(IconPlacement { Top => "top", Bottom => "bottom" });
