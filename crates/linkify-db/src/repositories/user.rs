//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use linkify_core::entities::{Appearance, User};
use linkify_core::error::DomainError;
use linkify_core::traits::{RepoResult, UserRepository};
use linkify_core::value_objects::Snowflake;

use crate::models::UserModel;

use super::appearance::insert_defaults;
use super::error::{map_db_error, map_unique_violation};

const USER_COLUMNS: &str = "id, email, username, display_name, bio, image_url, image_public_id, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, value: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {filter}"
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }
}

fn conflict_for(user: &User) -> impl FnOnce(Option<&str>) -> DomainError + '_ {
    move |constraint| match constraint {
        Some("users_email_key") => DomainError::EmailAlreadyExists,
        _ => DomainError::UsernameTaken(user.username.clone()),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.find_one("LOWER(email) = LOWER($1)", email).await
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.find_one("username = $1", username).await
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, user, password_hash, appearance), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str, appearance: &Appearance) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO users (id, email, username, password_hash, display_name, bio,
                               image_url, image_public_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.email)
        .bind(&user.username)
        .bind(password_hash)
        .bind(&user.display_name)
        .bind(&user.bio)
        .bind(&user.image_url)
        .bind(&user.image_public_id)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, conflict_for(user)))?;

        insert_defaults(&mut tx, appearance).await?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET username = $2, display_name = $3, bio = $4, image_url = $5,
                image_public_id = $6, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(&user.display_name)
        .bind(&user.bio)
        .bind(&user.image_url)
        .bind(&user.image_public_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, conflict_for(user)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
