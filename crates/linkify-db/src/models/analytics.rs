//! Analytics rows: raw events and grouped counts

use chrono::NaiveDate;
use sqlx::FromRow;

/// `SELECT kind, COUNT(*)` row
#[derive(Debug, Clone, FromRow)]
pub struct KindCountModel {
    pub kind: String,
    pub count: i64,
}

/// `SELECT day, kind, COUNT(*)` row
#[derive(Debug, Clone, FromRow)]
pub struct DailyCountModel {
    pub day: NaiveDate,
    pub kind: String,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct LinkClicksModel {
    pub link_id: i64,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct ReferrerCountModel {
    pub referrer: Option<String>,
    pub count: i64,
}
