//! PostgreSQL implementation of TestimonialRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use linkify_core::entities::Testimonial;
use linkify_core::error::DomainError;
use linkify_core::entitlements::Entitlements;
use linkify_core::traits::{RepoResult, TestimonialRepository};
use linkify_core::value_objects::Snowflake;

use crate::models::TestimonialModel;

use super::error::map_db_error;
use super::ordering::TESTIMONIALS;

const TESTIMONIAL_COLUMNS: &str =
    "id, user_id, name, email, rating, message, should_show, position, created_at";

#[derive(Clone)]
pub struct PgTestimonialRepository {
    pool: PgPool,
}

impl PgTestimonialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TestimonialRepository for PgTestimonialRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Testimonial>> {
        let result = sqlx::query_as::<_, TestimonialModel>(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Testimonial::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Testimonial>> {
        let results = sqlx::query_as::<_, TestimonialModel>(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE user_id = $1 ORDER BY position, id"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Testimonial::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_showcased(&self, user_id: Snowflake) -> RepoResult<Vec<Testimonial>> {
        let results = sqlx::query_as::<_, TestimonialModel>(&format!(
            r"
            SELECT {TESTIMONIAL_COLUMNS}
            FROM testimonials
            WHERE user_id = $1 AND should_show
            ORDER BY position, id
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Testimonial::from).collect())
    }

    #[instrument(skip(self, testimonial), fields(testimonial_id = %testimonial.id))]
    async fn create(&self, testimonial: &Testimonial) -> RepoResult<i32> {
        let (mut tx, position) = TESTIMONIALS.begin_append(&self.pool, testimonial.user_id).await?;

        sqlx::query(
            r"
            INSERT INTO testimonials (id, user_id, name, email, rating, message,
                                      should_show, position, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(testimonial.id.into_inner())
        .bind(testimonial.user_id.into_inner())
        .bind(&testimonial.name)
        .bind(&testimonial.email)
        .bind(testimonial.rating)
        .bind(&testimonial.message)
        .bind(testimonial.should_show)
        .bind(position)
        .bind(testimonial.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(position)
    }

    #[instrument(skip(self, testimonial, entitlements), fields(testimonial_id = %testimonial.id))]
    async fn set_visibility(
        &self,
        testimonial: &Testimonial,
        should_show: bool,
        entitlements: Entitlements,
    ) -> RepoResult<()> {
        let mut tx = TESTIMONIALS.begin_locked(&self.pool, testimonial.user_id).await?;

        let shown = sqlx::query_scalar::<_, bool>(
            "SELECT should_show FROM testimonials WHERE id = $1 AND user_id = $2",
        )
        .bind(testimonial.id.into_inner())
        .bind(testimonial.user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::TestimonialNotFound(testimonial.id))?;

        if shown == should_show {
            return Ok(());
        }

        if should_show {
            let showcased = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM testimonials WHERE user_id = $1 AND should_show",
            )
            .bind(testimonial.user_id.into_inner())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

            entitlements.ensure_can_showcase(showcased)?;
        }

        sqlx::query("UPDATE testimonials SET should_show = $2 WHERE id = $1")
            .bind(testimonial.id.into_inner())
            .bind(should_show)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, testimonial), fields(testimonial_id = %testimonial.id))]
    async fn delete(&self, testimonial: &Testimonial) -> RepoResult<()> {
        let deleted = TESTIMONIALS
            .delete_and_compact(&self.pool, testimonial.id, testimonial.user_id)
            .await?;

        if deleted == 0 {
            return Err(DomainError::TestimonialNotFound(testimonial.id));
        }
        Ok(())
    }

    #[instrument(skip(self, ids))]
    async fn reorder(&self, user_id: Snowflake, ids: &[Snowflake]) -> RepoResult<()> {
        TESTIMONIALS.apply_reorder(&self.pool, user_id, ids).await
    }
}
