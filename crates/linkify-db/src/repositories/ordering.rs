//! Transactional helpers for `position` columns
//!
//! Every write that changes a list's positions first locks the parent row
//! with `SELECT ... FOR UPDATE`, so appends, deletes and reorders on the same
//! list run one after another and positions stay contiguous.
//!
//! Table and column names come from `&'static str` constants in this crate,
//! never from input.

use linkify_core::error::DomainError;
use linkify_core::ordering::{next_index, plan_reorder};
use linkify_core::traits::RepoResult;
use linkify_core::value_objects::Snowflake;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use super::error::map_db_error;

/// A list ordered by `position` within one parent row
#[derive(Debug, Clone, Copy)]
pub struct OrderedTable {
    pub table: &'static str,
    pub parent_table: &'static str,
    pub parent_column: &'static str,
    pub missing_parent: fn(Snowflake) -> DomainError,
}

pub const SECTIONS: OrderedTable = OrderedTable {
    table: "sections",
    parent_table: "users",
    parent_column: "user_id",
    missing_parent: DomainError::UserNotFound,
};
pub const LINKS: OrderedTable = OrderedTable {
    table: "links",
    parent_table: "sections",
    parent_column: "section_id",
    missing_parent: DomainError::SectionNotFound,
};
pub const SOCIAL_LINKS: OrderedTable = OrderedTable {
    table: "social_links",
    parent_table: "users",
    parent_column: "user_id",
    missing_parent: DomainError::UserNotFound,
};
pub const TESTIMONIALS: OrderedTable = OrderedTable {
    table: "testimonials",
    parent_table: "users",
    parent_column: "user_id",
    missing_parent: DomainError::UserNotFound,
};

impl OrderedTable {
    /// Open a transaction holding the row lock on `parent`
    pub async fn begin_locked(&self, pool: &PgPool, parent: Snowflake) -> RepoResult<Transaction<'static, Postgres>> {
        let mut tx = pool.begin().await.map_err(map_db_error)?;
        if !self.lock_parent(&mut tx, parent).await? {
            return Err((self.missing_parent)(parent));
        }
        Ok(tx)
    }

    /// `false` when the parent row does not exist
    async fn lock_parent(&self, tx: &mut Transaction<'_, Postgres>, parent: Snowflake) -> RepoResult<bool> {
        let locked = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT id FROM {} WHERE id = $1 FOR UPDATE",
            self.parent_table
        ))
        .bind(parent.into_inner())
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(locked.is_some())
    }

    /// Lock `parent` and compute the position for a new last row
    ///
    /// The caller inserts at the returned position on the returned
    /// transaction and commits it.
    pub async fn begin_append(&self, pool: &PgPool, parent: Snowflake) -> RepoResult<(Transaction<'static, Postgres>, i32)> {
        let mut tx = self.begin_locked(pool, parent).await?;

        let count = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM {} WHERE {} = $1",
            self.table, self.parent_column
        ))
        .bind(parent.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        Ok((tx, next_index(count)?))
    }

    /// Check `requested` against the current rows and rewrite every position
    ///
    /// The current order is read after the parent lock is taken; a request
    /// that is not a permutation of it rolls back with `ReorderMismatch`.
    pub async fn apply_reorder(&self, pool: &PgPool, parent: Snowflake, requested: &[Snowflake]) -> RepoResult<()> {
        let mut tx = self.begin_locked(pool, parent).await?;

        let current: Vec<Snowflake> = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT id FROM {} WHERE {} = $1 ORDER BY position, id",
            self.table, self.parent_column
        ))
        .bind(parent.into_inner())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?
        .into_iter()
        .map(Snowflake::new)
        .collect();

        let plan = plan_reorder(&current, requested)?;

        let sql = format!(
            "UPDATE {} SET position = $3 WHERE id = $1 AND {} = $2",
            self.table, self.parent_column
        );
        for (id, position) in &plan {
            sqlx::query(&sql)
                .bind(id.into_inner())
                .bind(parent.into_inner())
                .bind(position)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        debug!(table = self.table, parent = %parent, rows = plan.len(), "Reorder applied");
        Ok(())
    }

    /// Delete one row and shift later siblings down by one
    ///
    /// The gap is closed at the position the row held when it was deleted.
    /// Returns the number of rows deleted.
    pub async fn delete_and_compact(&self, pool: &PgPool, id: Snowflake, parent: Snowflake) -> RepoResult<u64> {
        let mut tx = pool.begin().await.map_err(map_db_error)?;
        if !self.lock_parent(&mut tx, parent).await? {
            return Ok(0);
        }

        let position = sqlx::query_scalar::<_, i32>(&format!(
            "DELETE FROM {} WHERE id = $1 AND {} = $2 RETURNING position",
            self.table, self.parent_column
        ))
        .bind(id.into_inner())
        .bind(parent.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(position) = position else {
            return Ok(0);
        };

        self.compact(&mut tx, parent, position).await?;
        tx.commit().await.map_err(map_db_error)?;
        Ok(1)
    }

    async fn compact(&self, tx: &mut Transaction<'_, Postgres>, parent: Snowflake, position: i32) -> RepoResult<()> {
        sqlx::query(&format!(
            "UPDATE {} SET position = position - 1 WHERE {} = $1 AND position > $2",
            self.table, self.parent_column
        ))
        .bind(parent.into_inner())
        .bind(position)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }
}
