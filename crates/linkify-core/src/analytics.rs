//! Analytics arithmetic: ranges, windows, deltas, click-through rate and
//! daily bucketing.
//!
//! The database layer only returns grouped counts; everything that turns
//! those counts into dashboard numbers lives here.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::EventKind;
use crate::error::DomainError;

/// Reporting range in days
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum AnalyticsRange {
    #[default]
    Week,
    Month,
    Quarter,
    Year,
}

impl AnalyticsRange {
    pub const ALL: [Self; 4] = [Self::Week, Self::Month, Self::Quarter, Self::Year];

    pub fn days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    pub fn from_days(days: i64) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|range| range.days() == days)
            .ok_or_else(|| {
                DomainError::ValidationError(format!(
                    "range must be one of 7, 30, 90 or 365 days, got {days}"
                ))
            })
    }

    pub fn duration(self) -> Duration {
        Duration::days(self.days())
    }
}

impl Serialize for AnalyticsRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.days())
    }
}

impl<'de> Deserialize<'de> for AnalyticsRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let days = i64::deserialize(deserializer)?;
        Self::from_days(days).map_err(serde::de::Error::custom)
    }
}

/// Half-open time window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// The `range` days leading up to `now`
    pub fn current(range: AnalyticsRange, now: DateTime<Utc>) -> Self {
        Self {
            start: now - range.duration(),
            end: now,
        }
    }

    /// `range` whole UTC days ending with the day of `now`
    ///
    /// Starts at midnight so the daily series and its query cover the
    /// same days; the last day is partial and ends at `now`.
    pub fn daily(range: AnalyticsRange, now: DateTime<Utc>) -> Self {
        let first = now.date_naive() - Duration::days(range.days() - 1);
        Self {
            start: first.and_time(NaiveTime::MIN).and_utc(),
            end: now,
        }
    }

    /// The window of equal length immediately before this one
    pub fn previous(&self) -> Self {
        let length = self.end - self.start;
        Self {
            start: self.start - length,
            end: self.start,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage change from `previous` to `current`, rounded to 2 decimals
pub fn percentage_delta(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        return if current > 0 { 100.0 } else { 0.0 };
    }
    round2((current - previous) as f64 / previous as f64 * 100.0)
}

/// Clicks per view as a percentage, rounded to 2 decimals; 0 without views
pub fn click_through_rate(clicks: i64, views: i64) -> f64 {
    if views <= 0 {
        return 0.0;
    }
    round2(clicks as f64 / views as f64 * 100.0)
}

/// Classify a page view by the presence of the `viewed-at` cookie
pub fn classify_view(has_viewed_cookie: bool) -> EventKind {
    if has_viewed_cookie {
        EventKind::View
    } else {
        EventKind::UniqueView
    }
}

/// Event counts per kind for one window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub views: i64,
    pub unique_views: i64,
    pub clicks: i64,
}

impl EventCounts {
    /// Fold `(kind, count)` rows from a grouped query
    pub fn from_rows(rows: impl IntoIterator<Item = (EventKind, i64)>) -> Self {
        rows.into_iter().fold(Self::default(), |mut acc, (kind, count)| {
            match kind {
                EventKind::View => acc.views += count,
                EventKind::UniqueView => {
                    acc.views += count;
                    acc.unique_views += count;
                }
                EventKind::Click => acc.clicks += count,
            }
            acc
        })
    }

    pub fn ctr(&self) -> f64 {
        click_through_rate(self.clicks, self.views)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            views: self.views + other.views,
            unique_views: self.unique_views + other.unique_views,
            clicks: self.clicks + other.clicks,
        }
    }
}

/// A metric with its change against the previous window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metric {
    pub value: f64,
    pub delta: f64,
}

/// Dashboard headline numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub range: AnalyticsRange,
    pub views: Metric,
    pub unique_views: Metric,
    pub clicks: Metric,
    pub ctr: Metric,
}

impl Summary {
    pub fn compare(range: AnalyticsRange, current: EventCounts, previous: EventCounts) -> Self {
        let metric = |c: i64, p: i64| Metric {
            value: c as f64,
            delta: percentage_delta(c, p),
        };

        let current_ctr = current.ctr();
        let previous_ctr = previous.ctr();
        let ctr_delta = if previous_ctr == 0.0 {
            if current_ctr > 0.0 { 100.0 } else { 0.0 }
        } else {
            round2((current_ctr - previous_ctr) / previous_ctr * 100.0)
        };

        Self {
            range,
            views: metric(current.views, previous.views),
            unique_views: metric(current.unique_views, previous.unique_views),
            clicks: metric(current.clicks, previous.clicks),
            ctr: Metric {
                value: current_ctr,
                delta: ctr_delta,
            },
        }
    }
}

/// One point of the daily series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub views: i64,
    pub unique_views: i64,
    pub clicks: i64,
}

/// Expand `(day, kind, count)` rows into one point per day of `window`
///
/// Days run from the day of `window.start` up to and including the day of
/// `window.end`; days without rows are zero. Pass [`Window::daily`] to get
/// exactly `range` points.
pub fn fill_daily(
    window: Window,
    rows: impl IntoIterator<Item = (NaiveDate, EventKind, i64)>,
) -> Vec<DailyPoint> {
    let mut by_day: HashMap<NaiveDate, EventCounts> = HashMap::new();
    for (day, kind, count) in rows {
        let entry = by_day.entry(day).or_default();
        *entry = EventCounts::from_rows([(kind, count)]).merge(*entry);
    }

    let first = window.start.date_naive();
    let days = (window.end.date_naive() - first).num_days().max(0);

    (0..=days)
        .map(|offset| {
            let date = first + Duration::days(offset);
            let counts = by_day.get(&date).copied().unwrap_or_default();
            DailyPoint {
                date,
                views: counts.views,
                unique_views: counts.unique_views,
                clicks: counts.clicks,
            }
        })
        .collect()
}

/// Click stats for one link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkStat {
    pub link_id: String,
    pub text: String,
    pub url: String,
    pub clicks: i64,
    pub ctr: f64,
}

/// Event count for one referrer host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferrerStat {
    /// `None` for direct traffic
    pub referrer: Option<String>,
    pub count: i64,
}
