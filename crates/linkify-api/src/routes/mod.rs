//! Route definitions
//!
//! Dashboard routes live under /api/v1; the public page, analytics beacon,
//! billing webhook and settings form keep their short paths.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    analytics, appearance, auth, billing, forms, health, links, media, public, sections,
    social_links, testimonials, users,
};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api/v1", api_v1_routes())
        .route("/api/analytics", post(analytics::record_event))
        .route("/api/webhook", post(billing::webhook))
        .route("/api/settings", post(appearance::update_settings))
        .route("/:username", get(public::get_profile))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(content_routes())
        .merge(appearance_routes())
        .merge(engagement_routes())
        .merge(analytics_routes())
        .merge(billing_routes())
        .merge(public_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/users/@me/username", put(users::change_username))
        .route("/media/signature", post(media::upload_signature))
}

/// Sections, links and social links
fn content_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/sections",
            get(sections::list_sections).post(sections::create_section),
        )
        .route("/sections/order", put(sections::reorder_sections))
        .route(
            "/sections/:section_id",
            patch(sections::rename_section).delete(sections::delete_section),
        )
        .route("/sections/:section_id/links", post(links::create_link))
        .route("/sections/:section_id/links/order", put(links::reorder_links))
        .route(
            "/links/:link_id",
            patch(links::update_link).delete(links::delete_link),
        )
        .route(
            "/social-links",
            get(social_links::list_social_links).post(social_links::create_social_link),
        )
        .route("/social-links/order", put(social_links::reorder_social_links))
        .route(
            "/social-links/:id",
            patch(social_links::update_social_link).delete(social_links::delete_social_link),
        )
}

/// Theme, layout, button and settings
fn appearance_routes() -> Router<AppState> {
    Router::new()
        .route("/appearance", get(appearance::get_appearance))
        .route("/appearance/theme", put(appearance::update_theme))
        .route("/appearance/layout", put(appearance::update_layout))
        .route("/appearance/button", put(appearance::update_button))
        .route("/settings", get(appearance::get_settings))
}

/// Testimonials and the contact form
fn engagement_routes() -> Router<AppState> {
    Router::new()
        .route("/testimonials", get(testimonials::list_testimonials))
        .route("/testimonials/order", put(testimonials::reorder_testimonials))
        .route("/testimonials/:id", delete(testimonials::delete_testimonial))
        .route("/testimonials/:id/visibility", put(testimonials::set_visibility))
        .route("/form", get(forms::get_form).put(forms::upsert_form))
        .route("/form/submissions", get(forms::list_submissions))
        .route("/form/submissions/:id", delete(forms::delete_submission))
        .route("/form/usage", get(forms::get_usage))
}

/// Dashboard analytics
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/summary", get(analytics::summary))
        .route("/analytics/timeseries", get(analytics::timeseries))
        .route("/analytics/links", get(analytics::top_links))
        .route("/analytics/referrers", get(analytics::top_referrers))
}

/// Billing routes
fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/billing/checkout", post(billing::create_checkout))
        .route("/billing/subscription", get(billing::get_subscription))
        .route("/billing/portal", get(billing::get_portal))
}

/// Visitor submissions, rate limited per client
fn public_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/public/:username/testimonials",
            post(public::submit_testimonial),
        )
        .route("/public/:username/form", post(public::submit_form))
}
