//! Analytics service - event capture and dashboard aggregates

use std::collections::HashMap;

use chrono::Utc;
use linkify_core::analytics::{
    classify_view, click_through_rate, fill_daily, AnalyticsRange, EventCounts, LinkStat,
    ReferrerStat, Summary, Window,
};
use linkify_core::entities::{AnalyticsEvent, Device, EventKind};
use linkify_core::error::DomainError;
use linkify_core::Snowflake;
use tracing::{debug, instrument};

use crate::dto::{AnalyticsQuery, RecordEventRequest, RecordEventResponse, TimeseriesResponse, TrackedKind};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::link::LinkService;
use super::testimonial::profile_owner;

/// Number of rows in the top links and top referrers tables
pub const TOP_LIMIT: i64 = 10;

/// What the transport layer knows about the visitor
#[derive(Debug, Clone, Default)]
pub struct VisitContext {
    /// Whether the request carried the `viewed-at` cookie
    pub has_viewed_cookie: bool,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

pub struct AnalyticsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a view or click on a public profile
    ///
    /// Views become `unique_view` when the visitor has no `viewed-at`
    /// cookie yet; the caller sets the cookie when that is the result.
    #[instrument(skip(self, request, visit), fields(username = %request.username))]
    pub async fn record(
        &self,
        request: RecordEventRequest,
        visit: VisitContext,
    ) -> ServiceResult<RecordEventResponse> {
        let owner = profile_owner(self.ctx, &request.username).await?;

        let (kind, link_id) = match request.kind {
            TrackedKind::View => (classify_view(visit.has_viewed_cookie), None),
            TrackedKind::Click => {
                let link_id = request
                    .link_id
                    .ok_or_else(|| DomainError::ValidationError("link_id is required for clicks".into()))?;
                let link = LinkService::new(self.ctx).resolve_click_target(owner.id, link_id).await?;
                (EventKind::Click, Some(link.id))
            }
        };

        let event = AnalyticsEvent::new(
            self.ctx.generate_id(),
            owner.id,
            kind,
            link_id,
            visit.referrer.as_deref(),
            Device::from_user_agent(visit.user_agent.as_deref()),
        );
        self.ctx.analytics_repo().record(&event).await?;

        debug!(user_id = %owner.id, kind = kind.as_str(), "Analytics event recorded");

        Ok(RecordEventResponse { kind })
    }

    /// Parse `?range=` and check it against the user's plan
    async fn window_for(&self, user_id: Snowflake, query: AnalyticsQuery) -> ServiceResult<(AnalyticsRange, Window)> {
        let range = match query.range {
            Some(days) => AnalyticsRange::from_days(days)?,
            None => AnalyticsRange::default(),
        };

        let plan = self.ctx.current_plan(user_id).await?;
        plan.entitlements().ensure_range(range)?;

        Ok((range, Window::current(range, Utc::now())))
    }

    async fn counts(&self, user_id: Snowflake, window: Window) -> ServiceResult<EventCounts> {
        let rows = self.ctx.analytics_repo().count_by_kind(user_id, window).await?;
        Ok(EventCounts::from_rows(rows))
    }

    /// Views, unique views, clicks and CTR compared with the previous window
    #[instrument(skip(self))]
    pub async fn summary(&self, user_id: Snowflake, query: AnalyticsQuery) -> ServiceResult<Summary> {
        let (range, window) = self.window_for(user_id, query).await?;

        let current = self.counts(user_id, window).await?;
        let previous = self.counts(user_id, window.previous()).await?;

        Ok(Summary::compare(range, current, previous))
    }

    /// One point per UTC day, zero-filled
    #[instrument(skip(self))]
    pub async fn timeseries(&self, user_id: Snowflake, query: AnalyticsQuery) -> ServiceResult<TimeseriesResponse> {
        let (range, _) = self.window_for(user_id, query).await?;
        let window = Window::daily(range, Utc::now());
        let rows = self.ctx.analytics_repo().count_by_day(user_id, window).await?;

        Ok(TimeseriesResponse {
            range,
            points: fill_daily(window, rows),
        })
    }

    /// Most clicked links with CTR against all views in the window
    #[instrument(skip(self))]
    pub async fn top_links(&self, user_id: Snowflake, query: AnalyticsQuery) -> ServiceResult<Vec<LinkStat>> {
        let (_, window) = self.window_for(user_id, query).await?;

        let views = self.counts(user_id, window).await?.views;
        let clicks = self
            .ctx
            .analytics_repo()
            .clicks_by_link(user_id, window, TOP_LIMIT)
            .await?;

        let links: HashMap<Snowflake, _> = self
            .ctx
            .link_repo()
            .find_by_user(user_id)
            .await?
            .into_iter()
            .map(|link| (link.id, link))
            .collect();

        // Clicks on links deleted since are dropped
        Ok(clicks
            .into_iter()
            .filter_map(|(link_id, count)| {
                links.get(&link_id).map(|link| LinkStat {
                    link_id: link_id.to_string(),
                    text: link.text.clone(),
                    url: link.url.clone(),
                    clicks: count,
                    ctr: click_through_rate(count, views),
                })
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn top_referrers(&self, user_id: Snowflake, query: AnalyticsQuery) -> ServiceResult<Vec<ReferrerStat>> {
        let (_, window) = self.window_for(user_id, query).await?;
        let rows = self
            .ctx
            .analytics_repo()
            .count_by_referrer(user_id, window, TOP_LIMIT)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(referrer, count)| ReferrerStat { referrer, count })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{CreateLinkRequest, CreateSectionRequest};
    use crate::services::testing::Harness;
    use crate::services::SectionService;

    fn view(username: &str) -> RecordEventRequest {
        RecordEventRequest { username: username.into(), kind: TrackedKind::View, link_id: None }
    }

    fn click(username: &str, link_id: Snowflake) -> RecordEventRequest {
        RecordEventRequest { username: username.into(), kind: TrackedKind::Click, link_id: Some(link_id) }
    }

    fn visit(has_viewed_cookie: bool) -> VisitContext {
        VisitContext {
            has_viewed_cookie,
            referrer: Some("https://www.instagram.com/p/123".into()),
            user_agent: Some("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile".into()),
        }
    }

    async fn link(h: &Harness, user_id: Snowflake) -> Snowflake {
        let section: Snowflake = SectionService::new(&h.ctx)
            .create_section(user_id, CreateSectionRequest { name: "Main".into() })
            .await
            .unwrap()
            .id
            .parse()
            .unwrap();
        LinkService::new(&h.ctx)
            .create_link(
                user_id,
                section,
                CreateLinkRequest {
                    text: "Shop".into(),
                    url: "https://shop.test".into(),
                    thumbnail_url: None,
                    thumbnail_public_id: None,
                },
            )
            .await
            .unwrap()
            .id
            .parse()
            .unwrap()
    }

    #[tokio::test]
    async fn test_cookie_decides_unique_view() {
        let h = Harness::new();
        h.user("sam");
        let service = AnalyticsService::new(&h.ctx);

        let first = service.record(view("sam"), visit(false)).await.unwrap();
        let repeat = service.record(view("sam"), visit(true)).await.unwrap();

        assert_eq!(first.kind, EventKind::UniqueView);
        assert_eq!(repeat.kind, EventKind::View);

        let tables = h.store.tables();
        assert_eq!(tables.events[0].referrer.as_deref(), Some("instagram.com"));
        assert_eq!(tables.events[0].device, Device::Mobile);
    }

    #[tokio::test]
    async fn test_click_needs_a_link() {
        let h = Harness::new();
        h.user("sam");
        let request = RecordEventRequest { username: "sam".into(), kind: TrackedKind::Click, link_id: None };
        let err = AnalyticsService::new(&h.ctx).record(request, visit(true)).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_summary_and_top_links() {
        let h = Harness::new();
        let user = h.user("sam");
        let link_id = link(&h, user.id).await;
        let service = AnalyticsService::new(&h.ctx);

        service.record(view("sam"), visit(false)).await.unwrap();
        for _ in 0..3 {
            service.record(view("sam"), visit(true)).await.unwrap();
        }
        service.record(click("sam", link_id), visit(true)).await.unwrap();

        let summary = service.summary(user.id, AnalyticsQuery::default()).await.unwrap();
        assert_eq!(summary.views.value, 4.0);
        assert_eq!(summary.unique_views.value, 1.0);
        assert_eq!(summary.clicks.value, 1.0);
        assert_eq!(summary.ctr.value, 25.0);
        assert_eq!(summary.views.delta, 100.0);

        let top = service.top_links(user.id, AnalyticsQuery::default()).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].clicks, 1);
        assert_eq!(top[0].ctr, 25.0);

        let referrers = service.top_referrers(user.id, AnalyticsQuery::default()).await.unwrap();
        assert_eq!(referrers[0].referrer.as_deref(), Some("instagram.com"));
        assert_eq!(referrers[0].count, 4);
    }

    #[tokio::test]
    async fn test_timeseries_has_one_point_per_day() {
        let h = Harness::new();
        let user = h.user("sam");
        let service = AnalyticsService::new(&h.ctx);
        service.record(view("sam"), visit(false)).await.unwrap();

        let series = service.timeseries(user.id, AnalyticsQuery { range: Some(7) }).await.unwrap();
        assert_eq!(series.points.len(), 7);
        assert_eq!(series.points.iter().map(|p| p.views).sum::<i64>(), 1);
    }

    #[tokio::test]
    async fn test_long_ranges_need_pro() {
        let h = Harness::new();
        let user = h.user("sam");
        let service = AnalyticsService::new(&h.ctx);

        let err = service.summary(user.id, AnalyticsQuery { range: Some(30) }).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        let err = service.summary(user.id, AnalyticsQuery { range: Some(12) }).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        h.make_pro(user.id);
        let series = service.timeseries(user.id, AnalyticsQuery { range: Some(365) }).await.unwrap();
        assert_eq!(series.points.len(), 365);
    }
}
