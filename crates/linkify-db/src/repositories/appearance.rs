//! PostgreSQL implementation of AppearanceRepository
//!
//! Each appearance table holds at most one row per user; writes are upserts.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::instrument;

use linkify_core::entities::{Appearance, ButtonStyle, Layout, Settings, Theme};
use linkify_core::traits::{AppearanceRepository, RepoResult};
use linkify_core::value_objects::Snowflake;

use crate::models::{ButtonStyleModel, LayoutModel, SettingsModel, ThemeModel};

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgAppearanceRepository {
    pool: PgPool,
}

impl PgAppearanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(super) async fn upsert_theme(conn: &mut PgConnection, theme: &Theme) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO themes (user_id, background_color, text_color, font, updated_at)
        VALUES ($1, $2, $3, $4, NOW())
        ON CONFLICT (user_id) DO UPDATE
        SET background_color = EXCLUDED.background_color,
            text_color = EXCLUDED.text_color,
            font = EXCLUDED.font,
            updated_at = NOW()
        ",
    )
    .bind(theme.user_id.into_inner())
    .bind(&theme.background_color)
    .bind(&theme.text_color)
    .bind(&theme.font)
    .execute(conn)
    .await
    .map_err(map_db_error)?;
    Ok(())
}

pub(super) async fn upsert_layout(conn: &mut PgConnection, layout: &Layout) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO layouts (user_id, style, image_shape, updated_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (user_id) DO UPDATE
        SET style = EXCLUDED.style, image_shape = EXCLUDED.image_shape, updated_at = NOW()
        ",
    )
    .bind(layout.user_id.into_inner())
    .bind(layout.style.as_str())
    .bind(layout.image_shape.as_str())
    .execute(conn)
    .await
    .map_err(map_db_error)?;
    Ok(())
}

pub(super) async fn upsert_button(conn: &mut PgConnection, button: &ButtonStyle) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO button_styles (user_id, variant, radius, background_color, text_color, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        ON CONFLICT (user_id) DO UPDATE
        SET variant = EXCLUDED.variant,
            radius = EXCLUDED.radius,
            background_color = EXCLUDED.background_color,
            text_color = EXCLUDED.text_color,
            updated_at = NOW()
        ",
    )
    .bind(button.user_id.into_inner())
    .bind(button.variant.as_str())
    .bind(button.radius.as_str())
    .bind(&button.background_color)
    .bind(&button.text_color)
    .execute(conn)
    .await
    .map_err(map_db_error)?;
    Ok(())
}

pub(super) async fn upsert_settings(conn: &mut PgConnection, settings: &Settings) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO settings (user_id, seo_title, seo_description, social_icon_placement,
                              hide_branding, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        ON CONFLICT (user_id) DO UPDATE
        SET seo_title = EXCLUDED.seo_title,
            seo_description = EXCLUDED.seo_description,
            social_icon_placement = EXCLUDED.social_icon_placement,
            hide_branding = EXCLUDED.hide_branding,
            updated_at = NOW()
        ",
    )
    .bind(settings.user_id.into_inner())
    .bind(&settings.seo_title)
    .bind(&settings.seo_description)
    .bind(settings.social_icon_placement.as_str())
    .bind(settings.hide_branding)
    .execute(conn)
    .await
    .map_err(map_db_error)?;
    Ok(())
}

/// Write all four default rows inside the registration transaction
pub(super) async fn insert_defaults(tx: &mut Transaction<'_, Postgres>, appearance: &Appearance) -> RepoResult<()> {
    upsert_theme(&mut **tx, &appearance.theme).await?;
    upsert_layout(&mut **tx, &appearance.layout).await?;
    upsert_button(&mut **tx, &appearance.button).await?;
    upsert_settings(&mut **tx, &appearance.settings).await
}

#[async_trait]
impl AppearanceRepository for PgAppearanceRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Appearance> {
        let id = user_id.into_inner();
        let mut appearance = Appearance::default_for(user_id);

        let theme = sqlx::query_as::<_, ThemeModel>(
            "SELECT user_id, background_color, text_color, font, updated_at FROM themes WHERE user_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let layout = sqlx::query_as::<_, LayoutModel>(
            "SELECT user_id, style, image_shape, updated_at FROM layouts WHERE user_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let button = sqlx::query_as::<_, ButtonStyleModel>(
            r"
            SELECT user_id, variant, radius, background_color, text_color, updated_at
            FROM button_styles WHERE user_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let settings = sqlx::query_as::<_, SettingsModel>(
            r"
            SELECT user_id, seo_title, seo_description, social_icon_placement, hide_branding, updated_at
            FROM settings WHERE user_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(theme) = theme {
            appearance.theme = theme.into();
        }
        if let Some(layout) = layout {
            appearance.layout = layout.into();
        }
        if let Some(button) = button {
            appearance.button = button.into();
        }
        if let Some(settings) = settings {
            appearance.settings = settings.into();
        }

        Ok(appearance)
    }

    #[instrument(skip(self, theme), fields(user_id = %theme.user_id))]
    async fn save_theme(&self, theme: &Theme) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        upsert_theme(&mut conn, theme).await
    }

    #[instrument(skip(self, layout), fields(user_id = %layout.user_id))]
    async fn save_layout(&self, layout: &Layout) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        upsert_layout(&mut conn, layout).await
    }

    #[instrument(skip(self, button), fields(user_id = %button.user_id))]
    async fn save_button(&self, button: &ButtonStyle) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        upsert_button(&mut conn, button).await
    }

    #[instrument(skip(self, settings), fields(user_id = %settings.user_id))]
    async fn save_settings(&self, settings: &Settings) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        upsert_settings(&mut conn, settings).await
    }
}
