//! PostgreSQL implementation of SectionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use linkify_core::entities::Section;
use linkify_core::error::DomainError;
use linkify_core::traits::{RepoResult, SectionRepository};
use linkify_core::value_objects::Snowflake;

use crate::models::SectionModel;

use super::error::map_db_error;
use super::ordering::SECTIONS;

#[derive(Clone)]
pub struct PgSectionRepository {
    pool: PgPool,
}

impl PgSectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SectionRepository for PgSectionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Section>> {
        let result = sqlx::query_as::<_, SectionModel>(
            "SELECT id, user_id, name, position, created_at, updated_at FROM sections WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Section::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Section>> {
        let results = sqlx::query_as::<_, SectionModel>(
            r"
            SELECT id, user_id, name, position, created_at, updated_at
            FROM sections
            WHERE user_id = $1
            ORDER BY position, id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Section::from).collect())
    }

    #[instrument(skip(self, section), fields(section_id = %section.id))]
    async fn create(&self, section: &Section) -> RepoResult<i32> {
        let (mut tx, position) = SECTIONS.begin_append(&self.pool, section.user_id).await?;

        sqlx::query(
            r"
            INSERT INTO sections (id, user_id, name, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(section.id.into_inner())
        .bind(section.user_id.into_inner())
        .bind(&section.name)
        .bind(position)
        .bind(section.created_at)
        .bind(section.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(position)
    }

    #[instrument(skip(self, section), fields(section_id = %section.id))]
    async fn update(&self, section: &Section) -> RepoResult<()> {
        let result = sqlx::query("UPDATE sections SET name = $2, updated_at = NOW() WHERE id = $1")
            .bind(section.id.into_inner())
            .bind(&section.name)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::SectionNotFound(section.id));
        }
        Ok(())
    }

    #[instrument(skip(self, section), fields(section_id = %section.id))]
    async fn delete(&self, section: &Section) -> RepoResult<()> {
        // Links go with the section through ON DELETE CASCADE
        let deleted = SECTIONS
            .delete_and_compact(&self.pool, section.id, section.user_id)
            .await?;

        if deleted == 0 {
            return Err(DomainError::SectionNotFound(section.id));
        }
        Ok(())
    }

    #[instrument(skip(self, ids))]
    async fn reorder(&self, user_id: Snowflake, ids: &[Snowflake]) -> RepoResult<()> {
        SECTIONS.apply_reorder(&self.pool, user_id, ids).await
    }
}
