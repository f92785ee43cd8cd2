//! Visitor context for analytics capture
//!
//! Reads the `viewed-at` cookie and the referrer/user-agent headers of a
//! public page visit.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use linkify_service::services::VisitContext;

/// Marks a browser that has already been counted as a unique visitor
pub const VIEWED_COOKIE: &str = "viewed-at";

/// The cookie jar of the request plus what it tells us about the visitor
#[derive(Debug, Clone)]
pub struct Visitor {
    pub jar: CookieJar,
    pub context: VisitContext,
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[async_trait]
impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let context = VisitContext {
            has_viewed_cookie: jar.get(VIEWED_COOKIE).is_some(),
            referrer: header_value(&parts.headers, header::REFERER),
            user_agent: header_value(&parts.headers, header::USER_AGENT),
        };

        Ok(Self { jar, context })
    }
}

/// Build the `viewed-at` cookie, valid for `max_age_secs`
pub fn viewed_cookie(max_age_secs: i64) -> Cookie<'static> {
    let mut cookie = Cookie::new(VIEWED_COOKIE, Utc::now().timestamp().to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::seconds(max_age_secs));
    cookie
}
