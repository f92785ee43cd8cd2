//! Appearance entity <-> model mappers
//!
//! Unknown enum strings fall back to the default variant.

use linkify_core::entities::{ButtonStyle, Layout, Settings, Theme};
use linkify_core::value_objects::Snowflake;

use crate::models::{ButtonStyleModel, LayoutModel, SettingsModel, ThemeModel};

impl From<ThemeModel> for Theme {
    fn from(model: ThemeModel) -> Self {
        Theme {
            user_id: Snowflake::new(model.user_id),
            background_color: model.background_color,
            text_color: model.text_color,
            font: model.font,
            updated_at: model.updated_at,
        }
    }
}

impl From<LayoutModel> for Layout {
    fn from(model: LayoutModel) -> Self {
        Layout {
            user_id: Snowflake::new(model.user_id),
            style: model.style.parse().unwrap_or_default(),
            image_shape: model.image_shape.parse().unwrap_or_default(),
            updated_at: model.updated_at,
        }
    }
}

impl From<ButtonStyleModel> for ButtonStyle {
    fn from(model: ButtonStyleModel) -> Self {
        ButtonStyle {
            user_id: Snowflake::new(model.user_id),
            variant: model.variant.parse().unwrap_or_default(),
            radius: model.radius.parse().unwrap_or_default(),
            background_color: model.background_color,
            text_color: model.text_color,
            updated_at: model.updated_at,
        }
    }
}

impl From<SettingsModel> for Settings {
    fn from(model: SettingsModel) -> Self {
        Settings {
            user_id: Snowflake::new(model.user_id),
            seo_title: model.seo_title,
            seo_description: model.seo_description,
            social_icon_placement: model.social_icon_placement.parse().unwrap_or_default(),
            hide_branding: model.hide_branding,
            updated_at: model.updated_at,
        }
    }
}
