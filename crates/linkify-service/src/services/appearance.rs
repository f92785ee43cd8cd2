//! Appearance service - theme, layout, button style and page settings

use chrono::Utc;
use linkify_core::{HexColor, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    AppearanceResponse, SettingsResponse, UpdateButtonRequest, UpdateLayoutRequest,
    UpdateSettingsRequest, UpdateThemeRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct AppearanceService<'a> {
    ctx: &'a ServiceContext,
}

fn blank_to_none(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl<'a> AppearanceService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn get_appearance(&self, user_id: Snowflake) -> ServiceResult<AppearanceResponse> {
        let appearance = self.ctx.appearance_repo().find_by_user(user_id).await?;
        Ok(AppearanceResponse::from(appearance))
    }

    #[instrument(skip(self, request))]
    pub async fn update_theme(
        &self,
        user_id: Snowflake,
        request: UpdateThemeRequest,
    ) -> ServiceResult<AppearanceResponse> {
        let mut appearance = self.ctx.appearance_repo().find_by_user(user_id).await?;

        let theme = &mut appearance.theme;
        theme.background_color = HexColor::parse(&request.background_color)?.into_inner();
        theme.text_color = HexColor::parse(&request.text_color)?.into_inner();
        theme.font = request.font.trim().to_string();
        theme.updated_at = Utc::now();

        self.ctx.appearance_repo().save_theme(theme).await?;
        Ok(AppearanceResponse::from(appearance))
    }

    #[instrument(skip(self, request))]
    pub async fn update_layout(
        &self,
        user_id: Snowflake,
        request: UpdateLayoutRequest,
    ) -> ServiceResult<AppearanceResponse> {
        let mut appearance = self.ctx.appearance_repo().find_by_user(user_id).await?;

        let layout = &mut appearance.layout;
        layout.style = request.style;
        layout.image_shape = request.image_shape;
        layout.updated_at = Utc::now();

        self.ctx.appearance_repo().save_layout(layout).await?;
        Ok(AppearanceResponse::from(appearance))
    }

    #[instrument(skip(self, request))]
    pub async fn update_button(
        &self,
        user_id: Snowflake,
        request: UpdateButtonRequest,
    ) -> ServiceResult<AppearanceResponse> {
        let mut appearance = self.ctx.appearance_repo().find_by_user(user_id).await?;

        let button = &mut appearance.button;
        button.variant = request.variant;
        button.radius = request.radius;
        button.background_color = HexColor::parse(&request.background_color)?.into_inner();
        button.text_color = HexColor::parse(&request.text_color)?.into_inner();
        button.updated_at = Utc::now();

        self.ctx.appearance_repo().save_button(button).await?;
        Ok(AppearanceResponse::from(appearance))
    }

    #[instrument(skip(self))]
    pub async fn get_settings(&self, user_id: Snowflake) -> ServiceResult<SettingsResponse> {
        Ok(self.get_appearance(user_id).await?.settings)
    }

    /// Update SEO fields, icon placement and the branding flag
    ///
    /// Turning branding off needs Pro; turning it back on is always allowed.
    #[instrument(skip(self, request))]
    pub async fn update_settings(
        &self,
        user_id: Snowflake,
        request: UpdateSettingsRequest,
    ) -> ServiceResult<SettingsResponse> {
        let mut appearance = self.ctx.appearance_repo().find_by_user(user_id).await?;
        let settings = &mut appearance.settings;

        if let Some(title) = request.seo_title {
            settings.seo_title = blank_to_none(title);
        }
        if let Some(description) = request.seo_description {
            settings.seo_description = blank_to_none(description);
        }
        if let Some(placement) = request.social_icon_placement {
            settings.social_icon_placement = placement;
        }
        if let Some(hide_branding) = request.hide_branding {
            if hide_branding && !settings.hide_branding {
                let plan = self.ctx.current_plan(user_id).await?;
                plan.entitlements().ensure_can_hide_branding()?;
            }
            settings.hide_branding = hide_branding;
        }
        settings.updated_at = Utc::now();

        self.ctx.appearance_repo().save_settings(settings).await?;

        info!(user_id = %user_id, "Settings updated");

        Ok(AppearanceResponse::from(appearance).settings)
    }
}
