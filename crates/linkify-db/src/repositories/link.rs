//! PostgreSQL implementations of LinkRepository and SocialLinkRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use linkify_core::entities::{Link, SocialLink};
use linkify_core::error::DomainError;
use linkify_core::traits::{LinkRepository, RepoResult, SocialLinkRepository};
use linkify_core::value_objects::Snowflake;

use crate::models::{LinkModel, SocialLinkModel};

use super::error::map_db_error;
use super::ordering::{LINKS, SOCIAL_LINKS};

const LINK_COLUMNS: &str = "l.id, l.user_id, l.section_id, l.text, l.url, l.thumbnail_url, \
                            l.thumbnail_public_id, l.hidden, l.position, l.created_at, l.updated_at";

#[derive(Clone)]
pub struct PgLinkRepository {
    pool: PgPool,
}

impl PgLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Link>> {
        let result = sqlx::query_as::<_, LinkModel>(&format!(
            "SELECT {LINK_COLUMNS} FROM links l WHERE l.id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Link::from))
    }

    #[instrument(skip(self))]
    async fn find_by_section(&self, section_id: Snowflake) -> RepoResult<Vec<Link>> {
        let results = sqlx::query_as::<_, LinkModel>(&format!(
            "SELECT {LINK_COLUMNS} FROM links l WHERE l.section_id = $1 ORDER BY l.position, l.id"
        ))
        .bind(section_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Link::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Link>> {
        let results = sqlx::query_as::<_, LinkModel>(&format!(
            r"
            SELECT {LINK_COLUMNS}
            FROM links l
            JOIN sections s ON s.id = l.section_id
            WHERE l.user_id = $1
            ORDER BY s.position, l.position, l.id
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Link::from).collect())
    }

    #[instrument(skip(self, link), fields(link_id = %link.id))]
    async fn create(&self, link: &Link) -> RepoResult<i32> {
        let (mut tx, position) = LINKS.begin_append(&self.pool, link.section_id).await?;

        sqlx::query(
            r"
            INSERT INTO links (id, user_id, section_id, text, url, thumbnail_url,
                               thumbnail_public_id, hidden, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(link.id.into_inner())
        .bind(link.user_id.into_inner())
        .bind(link.section_id.into_inner())
        .bind(&link.text)
        .bind(&link.url)
        .bind(&link.thumbnail_url)
        .bind(&link.thumbnail_public_id)
        .bind(link.hidden)
        .bind(position)
        .bind(link.created_at)
        .bind(link.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(position)
    }

    #[instrument(skip(self, link), fields(link_id = %link.id))]
    async fn update(&self, link: &Link) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE links
            SET text = $2, url = $3, thumbnail_url = $4, thumbnail_public_id = $5,
                hidden = $6, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(link.id.into_inner())
        .bind(&link.text)
        .bind(&link.url)
        .bind(&link.thumbnail_url)
        .bind(&link.thumbnail_public_id)
        .bind(link.hidden)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LinkNotFound(link.id));
        }
        Ok(())
    }

    #[instrument(skip(self, link), fields(link_id = %link.id))]
    async fn delete(&self, link: &Link) -> RepoResult<()> {
        let deleted = LINKS
            .delete_and_compact(&self.pool, link.id, link.section_id)
            .await?;

        if deleted == 0 {
            return Err(DomainError::LinkNotFound(link.id));
        }
        Ok(())
    }

    #[instrument(skip(self, ids))]
    async fn reorder(&self, section_id: Snowflake, ids: &[Snowflake]) -> RepoResult<()> {
        LINKS.apply_reorder(&self.pool, section_id, ids).await
    }
}

#[derive(Clone)]
pub struct PgSocialLinkRepository {
    pool: PgPool,
}

impl PgSocialLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocialLinkRepository for PgSocialLinkRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<SocialLink>> {
        let result = sqlx::query_as::<_, SocialLinkModel>(
            r"
            SELECT id, user_id, platform, url, position, created_at, updated_at
            FROM social_links WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(SocialLink::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<SocialLink>> {
        let results = sqlx::query_as::<_, SocialLinkModel>(
            r"
            SELECT id, user_id, platform, url, position, created_at, updated_at
            FROM social_links
            WHERE user_id = $1
            ORDER BY position, id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(SocialLink::from).collect())
    }

    #[instrument(skip(self, social_link), fields(social_link_id = %social_link.id))]
    async fn create(&self, social_link: &SocialLink) -> RepoResult<i32> {
        let (mut tx, position) = SOCIAL_LINKS.begin_append(&self.pool, social_link.user_id).await?;

        sqlx::query(
            r"
            INSERT INTO social_links (id, user_id, platform, url, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(social_link.id.into_inner())
        .bind(social_link.user_id.into_inner())
        .bind(social_link.platform.as_str())
        .bind(&social_link.url)
        .bind(position)
        .bind(social_link.created_at)
        .bind(social_link.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(position)
    }

    #[instrument(skip(self, social_link), fields(social_link_id = %social_link.id))]
    async fn update(&self, social_link: &SocialLink) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE social_links SET platform = $2, url = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(social_link.id.into_inner())
        .bind(social_link.platform.as_str())
        .bind(&social_link.url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::SocialLinkNotFound(social_link.id));
        }
        Ok(())
    }

    #[instrument(skip(self, social_link), fields(social_link_id = %social_link.id))]
    async fn delete(&self, social_link: &SocialLink) -> RepoResult<()> {
        let deleted = SOCIAL_LINKS
            .delete_and_compact(&self.pool, social_link.id, social_link.user_id)
            .await?;

        if deleted == 0 {
            return Err(DomainError::SocialLinkNotFound(social_link.id));
        }
        Ok(())
    }

    #[instrument(skip(self, ids))]
    async fn reorder(&self, user_id: Snowflake, ids: &[Snowflake]) -> RepoResult<()> {
        SOCIAL_LINKS.apply_reorder(&self.pool, user_id, ids).await
    }
}
