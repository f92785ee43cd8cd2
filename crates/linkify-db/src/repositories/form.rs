//! PostgreSQL implementation of FormRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use linkify_core::entities::{Form, FormSubmission};
use linkify_core::error::DomainError;
use linkify_core::traits::{FormRepository, RepoResult};
use linkify_core::value_objects::Snowflake;

use crate::models::{FormModel, FormSubmissionModel};

use super::error::map_db_error;

const SUBMISSION_COLUMNS: &str =
    "id, form_id, user_id, name, email, phone, subject, message, created_at";

#[derive(Clone)]
pub struct PgFormRepository {
    pool: PgPool,
}

impl PgFormRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FormRepository for PgFormRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Form>> {
        let result = sqlx::query_as::<_, FormModel>(
            r"
            SELECT id, user_id, title, description, button_text, collect_phone,
                   collect_subject, enabled, created_at, updated_at
            FROM forms WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Form::from))
    }

    #[instrument(skip(self, form), fields(user_id = %form.user_id))]
    async fn upsert(&self, form: &Form) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO forms (id, user_id, title, description, button_text, collect_phone,
                               collect_subject, enabled, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET title = EXCLUDED.title,
                description = EXCLUDED.description,
                button_text = EXCLUDED.button_text,
                collect_phone = EXCLUDED.collect_phone,
                collect_subject = EXCLUDED.collect_subject,
                enabled = EXCLUDED.enabled,
                updated_at = NOW()
            ",
        )
        .bind(form.id.into_inner())
        .bind(form.user_id.into_inner())
        .bind(&form.title)
        .bind(&form.description)
        .bind(&form.button_text)
        .bind(form.collect_phone)
        .bind(form.collect_subject)
        .bind(form.enabled)
        .bind(form.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, submission), fields(submission_id = %submission.id))]
    async fn create_submission(&self, submission: &FormSubmission) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO form_submissions (id, form_id, user_id, name, email, phone,
                                          subject, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(submission.id.into_inner())
        .bind(submission.form_id.into_inner())
        .bind(submission.user_id.into_inner())
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(&submission.subject)
        .bind(&submission.message)
        .bind(submission.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_submission(&self, id: Snowflake) -> RepoResult<Option<FormSubmission>> {
        let result = sqlx::query_as::<_, FormSubmissionModel>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM form_submissions WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(FormSubmission::from))
    }

    #[instrument(skip(self))]
    async fn find_submissions(
        &self,
        user_id: Snowflake,
        before: Option<Snowflake>,
        limit: i64,
    ) -> RepoResult<Vec<FormSubmission>> {
        let results = if let Some(before_id) = before {
            sqlx::query_as::<_, FormSubmissionModel>(&format!(
                r"
                SELECT {SUBMISSION_COLUMNS}
                FROM form_submissions
                WHERE user_id = $1 AND id < $2
                ORDER BY id DESC
                LIMIT $3
                "
            ))
            .bind(user_id.into_inner())
            .bind(before_id.into_inner())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, FormSubmissionModel>(&format!(
                r"
                SELECT {SUBMISSION_COLUMNS}
                FROM form_submissions
                WHERE user_id = $1
                ORDER BY id DESC
                LIMIT $2
                "
            ))
            .bind(user_id.into_inner())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(FormSubmission::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_submissions_since(&self, user_id: Snowflake, since: DateTime<Utc>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM form_submissions WHERE user_id = $1 AND created_at >= $2",
        )
        .bind(user_id.into_inner())
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn delete_submission(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM form_submissions WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::SubmissionNotFound(id));
        }
        Ok(())
    }
}
