//! PostgreSQL implementation of AnalyticsRepository
//!
//! Every query is bounded by `[window.start, window.end)` and grouped in UTC.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use linkify_core::analytics::Window;
use linkify_core::entities::{AnalyticsEvent, EventKind};
use linkify_core::traits::{AnalyticsRepository, RepoResult};
use linkify_core::value_objects::Snowflake;

use crate::mappers::parse_event_kind;
use crate::models::{DailyCountModel, KindCountModel, LinkClicksModel, ReferrerCountModel};

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgAnalyticsRepository {
    pool: PgPool,
}

impl PgAnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    #[instrument(skip(self, event), fields(user_id = %event.user_id, kind = event.kind.as_str()))]
    async fn record(&self, event: &AnalyticsEvent) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO analytics_events (id, user_id, kind, link_id, referrer, device, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(event.id.into_inner())
        .bind(event.user_id.into_inner())
        .bind(event.kind.as_str())
        .bind(event.link_id.map(Snowflake::into_inner))
        .bind(&event.referrer)
        .bind(event.device.as_str())
        .bind(event.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_kind(&self, user_id: Snowflake, window: Window) -> RepoResult<Vec<(EventKind, i64)>> {
        let rows = sqlx::query_as::<_, KindCountModel>(
            r"
            SELECT kind, COUNT(*) AS count
            FROM analytics_events
            WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
            GROUP BY kind
            ",
        )
        .bind(user_id.into_inner())
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (parse_event_kind(&row.kind), row.count))
            .collect())
    }

    #[instrument(skip(self))]
    async fn count_by_day(
        &self,
        user_id: Snowflake,
        window: Window,
    ) -> RepoResult<Vec<(NaiveDate, EventKind, i64)>> {
        let rows = sqlx::query_as::<_, DailyCountModel>(
            r"
            SELECT (created_at AT TIME ZONE 'UTC')::date AS day, kind, COUNT(*) AS count
            FROM analytics_events
            WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
            GROUP BY day, kind
            ORDER BY day
            ",
        )
        .bind(user_id.into_inner())
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.day, parse_event_kind(&row.kind), row.count))
            .collect())
    }

    #[instrument(skip(self))]
    async fn clicks_by_link(
        &self,
        user_id: Snowflake,
        window: Window,
        limit: i64,
    ) -> RepoResult<Vec<(Snowflake, i64)>> {
        let rows = sqlx::query_as::<_, LinkClicksModel>(
            r"
            SELECT link_id, COUNT(*) AS count
            FROM analytics_events
            WHERE user_id = $1 AND kind = 'click' AND link_id IS NOT NULL
              AND created_at >= $2 AND created_at < $3
            GROUP BY link_id
            ORDER BY count DESC, link_id
            LIMIT $4
            ",
        )
        .bind(user_id.into_inner())
        .bind(window.start)
        .bind(window.end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (Snowflake::new(row.link_id), row.count))
            .collect())
    }

    #[instrument(skip(self))]
    async fn count_by_referrer(
        &self,
        user_id: Snowflake,
        window: Window,
        limit: i64,
    ) -> RepoResult<Vec<(Option<String>, i64)>> {
        // Referrers are attached to views only
        let rows = sqlx::query_as::<_, ReferrerCountModel>(
            r"
            SELECT referrer, COUNT(*) AS count
            FROM analytics_events
            WHERE user_id = $1 AND kind <> 'click'
              AND created_at >= $2 AND created_at < $3
            GROUP BY referrer
            ORDER BY count DESC, referrer NULLS LAST
            LIMIT $4
            ",
        )
        .bind(user_id.into_inner())
        .bind(window.start)
        .bind(window.end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(|row| (row.referrer, row.count)).collect())
    }
}
