//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer, TEST_WEBHOOK_SECRET,
};
use linkify_common::webhook::{sign, SIGNATURE_HEADER};
use reqwest::StatusCode;
use serde_json::json;

/// Register a fresh user and return the auth payload
async fn register(server: &TestServer) -> AuthResponse {
    let request = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_section(server: &TestServer, token: &str, name: &str) -> SectionResponse {
    let response = server
        .post_auth("/api/v1/sections", token, &CreateSectionRequest::named(name))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_link(server: &TestServer, token: &str, section_id: &str, text: &str) -> LinkResponse {
    let response = server
        .post_auth(
            &format!("/api/v1/sections/{section_id}/links"),
            token,
            &CreateLinkRequest::new(text, "https://example.com/"),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

fn subscription_webhook(user_id: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "meta": { "event_name": "subscription_created", "custom_data": { "user_id": user_id } },
        "data": {
            "type": "subscriptions",
            "id": "sub_integration",
            "attributes": {
                "customer_id": 4242,
                "variant_id": 1,
                "status": "active",
                "renews_at": "2099-01-01T00:00:00Z",
                "ends_at": null,
                "urls": { "customer_portal": "https://billing.example.com/portal" }
            }
        }
    }))
    .unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.user.plan, "free");
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &request).await.unwrap();

    let duplicate = RegisterRequest {
        username: format!("{}x", request.username),
        email: request.email.clone(),
        password: request.password.clone(),
    };
    let response = server.post("/api/v1/auth/register", &duplicate).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_reserved_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.username = "api".to_string();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.username, register_req.username);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "wrongpass1".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let response = server
        .post("/api/v1/auth/refresh", &json!({ "refresh_token": auth.refresh_token }))
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.user.id, auth.user.id);

    // An access token is not a refresh token
    let response = server
        .post("/api/v1/auth/refresh", &json!({ "refresh_token": auth.access_token }))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/@me").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_AUTHORIZATION");
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_update_profile_and_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let response = server
        .patch_auth(
            "/api/v1/users/@me",
            &auth.access_token,
            &json!({ "display_name": "Sam Rivers", "bio": "Photographer" }),
        )
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.display_name.as_deref(), Some("Sam Rivers"));
    assert_eq!(user.bio.as_deref(), Some("Photographer"));

    let new_name = format!("n{}", unique_suffix());
    let response = server
        .put_auth(
            "/api/v1/users/@me/username",
            &auth.access_token,
            &json!({ "username": new_name.to_uppercase() }),
        )
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.username, new_name);
}

// ============================================================================
// Section & Link Tests
// ============================================================================

#[tokio::test]
async fn test_section_and_link_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let token = &auth.access_token;

    let first = create_section(&server, token, "Work").await;
    let second = create_section(&server, token, "Music").await;
    assert_eq!(first.index, 0);
    assert_eq!(second.index, 1);

    let a = create_link(&server, token, &first.id, "Portfolio").await;
    let b = create_link(&server, token, &first.id, "Shop").await;
    assert_eq!((a.index, b.index), (0, 1));

    // Reorder links within the section
    let response = server
        .put_auth(
            &format!("/api/v1/sections/{}/links/order", first.id),
            token,
            &ReorderRequest { ids: vec![b.id.clone(), a.id.clone()] },
        )
        .await
        .unwrap();
    let links: Vec<LinkResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(links[0].id, b.id);
    assert_eq!(links[0].index, 0);

    // Reorder sections
    let response = server
        .put_auth(
            "/api/v1/sections/order",
            token,
            &ReorderRequest { ids: vec![second.id.clone(), first.id.clone()] },
        )
        .await
        .unwrap();
    let sections: Vec<SectionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(sections[0].id, second.id);

    // Deleting a link compacts the remaining indexes
    let response = server
        .delete_auth(&format!("/api/v1/links/{}", b.id), token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth("/api/v1/sections", token).await.unwrap();
    let sections: Vec<SectionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let work = sections.iter().find(|s| s.id == first.id).unwrap();
    assert_eq!(work.links.len(), 1);
    assert_eq!(work.links[0].id, a.id);
    assert_eq!(work.links[0].index, 0);
}

#[tokio::test]
async fn test_reorder_rejects_partial_list() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let token = &auth.access_token;

    let first = create_section(&server, token, "One").await;
    create_section(&server, token, "Two").await;

    let response = server
        .put_auth("/api/v1/sections/order", token, &ReorderRequest { ids: vec![first.id] })
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_cannot_modify_another_users_section() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let intruder = register(&server).await;

    let section = create_section(&server, &owner.access_token, "Private").await;

    let response = server
        .patch_auth(
            &format!("/api/v1/sections/{}", section.id),
            &intruder.access_token,
            &json!({ "name": "Mine now" }),
        )
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_invalid_path_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let response = server
        .delete_auth("/api/v1/links/not-a-number", &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Social Link Tests
// ============================================================================

#[tokio::test]
async fn test_social_links() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let token = &auth.access_token;

    let response = server
        .post_auth(
            "/api/v1/social-links",
            token,
            &json!({ "platform": "github", "url": "https://github.com/someone" }),
        )
        .await
        .unwrap();
    let github: SocialLinkResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(github.index, 0);

    let response = server
        .post_auth(
            "/api/v1/social-links",
            token,
            &json!({ "platform": "email", "url": "mailto:me@example.com" }),
        )
        .await
        .unwrap();
    let email: SocialLinkResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(email.url, "mailto:me@example.com");

    let response = server
        .post_auth(
            "/api/v1/social-links",
            token,
            &json!({ "platform": "github", "url": "javascript:alert(1)" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .put_auth(
            "/api/v1/social-links/order",
            token,
            &ReorderRequest { ids: vec![email.id.clone(), github.id.clone()] },
        )
        .await
        .unwrap();
    let links: Vec<SocialLinkResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(links[0].id, email.id);
}

// ============================================================================
// Public Profile & Analytics Tests
// ============================================================================

#[tokio::test]
async fn test_public_profile_hides_hidden_links() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let token = &auth.access_token;

    let section = create_section(&server, token, "Links").await;
    let shown = create_link(&server, token, &section.id, "Shown").await;
    let hidden = create_link(&server, token, &section.id, "Hidden").await;

    let response = server
        .patch_auth(&format!("/api/v1/links/{}", hidden.id), token, &json!({ "hidden": true }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/{}", auth.user.username)).await.unwrap();
    let profile: PublicProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(profile.username, auth.user.username);
    assert!(profile.show_branding);
    assert!(profile.form.is_none());
    let links: Vec<&str> = profile.sections[0].links.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(links, vec![shown.id.as_str()]);
}

#[tokio::test]
async fn test_unknown_profile_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get(&format!("/nobody{}", unique_suffix())).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_analytics_cookie_and_summary() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let username = auth.user.username.clone();
    let section = create_section(&server, &auth.access_token, "Links").await;
    let link = create_link(&server, &auth.access_token, &section.id, "Site").await;

    // First view: unique, and the cookie is issued
    let response = server.post("/api/analytics", &RecordEventRequest::view(&username)).await.unwrap();
    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .expect("viewed-at cookie");
    assert!(cookie.starts_with("viewed-at="));
    assert!(cookie.contains("HttpOnly"));
    let recorded: RecordEventResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(recorded.kind, "unique_view");

    // Returning visitor
    let pair = cookie.split(';').next().unwrap().to_string();
    let response = server
        .client
        .post(format!("{}/api/analytics", server.base_url()))
        .header("Cookie", pair)
        .json(&RecordEventRequest::view(&username))
        .send()
        .await
        .unwrap();
    assert!(response.headers().get("set-cookie").is_none());
    let recorded: RecordEventResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(recorded.kind, "view");

    let response = server
        .post("/api/analytics", &RecordEventRequest::click(&username, &link.id))
        .await
        .unwrap();
    let recorded: RecordEventResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(recorded.kind, "click");

    let response = server
        .get_auth("/api/v1/analytics/summary?range=7", &auth.access_token)
        .await
        .unwrap();
    let summary: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary["unique_views"]["value"], 1.0);
    assert_eq!(summary["clicks"]["value"], 1.0);

    let response = server
        .get_auth("/api/v1/analytics/links?range=7", &auth.access_token)
        .await
        .unwrap();
    let links: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(links[0]["link_id"], link.id.as_str());
}

#[tokio::test]
async fn test_free_plan_analytics_range_is_limited() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let response = server
        .get_auth("/api/v1/analytics/timeseries?range=90", &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Testimonial & Form Tests
// ============================================================================

#[tokio::test]
async fn test_testimonial_showcase() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let username = auth.user.username.clone();

    let response = server
        .post(
            &format!("/api/v1/public/{username}/testimonials"),
            &SubmitTestimonialRequest::five_stars(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get_auth("/api/v1/testimonials", &auth.access_token).await.unwrap();
    let testimonials: Vec<TestimonialResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(testimonials.len(), 1);
    assert!(!testimonials[0].should_show);

    let response = server
        .put_auth(
            &format!("/api/v1/testimonials/{}/visibility", testimonials[0].id),
            &auth.access_token,
            &json!({ "should_show": true }),
        )
        .await
        .unwrap();
    let updated: TestimonialResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(updated.should_show);

    let response = server.get(&format!("/{username}")).await.unwrap();
    let profile: PublicProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.testimonials.len(), 1);
    assert!(profile.testimonials[0].get("email").is_none());
}

#[tokio::test]
async fn test_bad_rating_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let response = server
        .post(
            &format!("/api/v1/public/{}/testimonials", auth.user.username),
            &json!({ "name": "Critic", "rating": 9, "message": "Off the scale" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_contact_form_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let token = &auth.access_token;
    let submit_path = format!("/api/v1/public/{}/form", auth.user.username);

    // No form configured yet
    let response = server.post(&submit_path, &SubmitFormRequest::unique()).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .put_auth("/api/v1/form", token, &UpsertFormRequest::enabled())
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    for _ in 0..3 {
        let response = server.post(&submit_path, &SubmitFormRequest::unique()).await.unwrap();
        let submission: FormSubmissionResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(submission.subject.as_deref(), Some("Hello"));
    }

    let response = server
        .get_auth("/api/v1/form/submissions?limit=2", token)
        .await
        .unwrap();
    let page: SubmissionPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert!(page.pagination.has_more);

    let cursor = page.pagination.before.expect("cursor");
    let response = server
        .get_auth(&format!("/api/v1/form/submissions?limit=2&before={cursor}"), token)
        .await
        .unwrap();
    let rest: SubmissionPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rest.data.len(), 1);
    assert!(!rest.pagination.has_more);

    let response = server.get_auth("/api/v1/form/usage", token).await.unwrap();
    let usage: FormUsageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(usage.used, 3);
    assert_eq!(usage.limit, Some(25));

    // Disabled forms refuse submissions
    let mut disabled = UpsertFormRequest::enabled();
    disabled.enabled = false;
    server.put_auth("/api/v1/form", token, &disabled).await.unwrap();
    let response = server.post(&submit_path, &SubmitFormRequest::unique()).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_public_submissions_are_rate_limited() {
    if !check_test_env().await {
        return;
    }

    let mut config = integration_tests::test_config().unwrap();
    config.rate_limit.submissions_per_minute = 2;
    let server = TestServer::start_with_config(config).await.expect("Failed to start server");
    let auth = register(&server).await;
    let path = format!("/api/v1/public/{}/testimonials", auth.user.username);

    for _ in 0..2 {
        let response = server.post(&path, &SubmitTestimonialRequest::five_stars()).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server.post(&path, &SubmitTestimonialRequest::five_stars()).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::TOO_MANY_REQUESTS).await.unwrap();
    assert_eq!(body.error.code, "RATE_LIMITED");
}

#[tokio::test]
async fn test_forwarded_for_does_not_reset_submission_quota() {
    if !check_test_env().await {
        return;
    }

    let mut config = integration_tests::test_config().unwrap();
    config.rate_limit.submissions_per_minute = 2;
    config.rate_limit.trust_proxy = false;
    let server = TestServer::start_with_config(config).await.expect("Failed to start server");
    let auth = register(&server).await;
    let path = format!("/api/v1/public/{}/testimonials", auth.user.username);
    let body = serde_json::to_vec(&SubmitTestimonialRequest::five_stars()).unwrap();

    let mut statuses = Vec::new();
    for hop in ["198.51.100.1", "198.51.100.2", "198.51.100.3"] {
        let response = server
            .post_raw(&path, body.clone(), &[("x-forwarded-for", hop)])
            .await
            .unwrap();
        statuses.push(response.status());
    }

    assert_eq!(
        statuses,
        vec![StatusCode::CREATED, StatusCode::CREATED, StatusCode::TOO_MANY_REQUESTS]
    );
}

// ============================================================================
// Settings & Billing Tests
// ============================================================================

#[tokio::test]
async fn test_hide_branding_requires_pro() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let token = &auth.access_token;

    let response = server
        .post_auth("/api/settings", token, &json!({ "seo_title": "My links" }))
        .await
        .unwrap();
    let settings: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(settings["seo_title"], "My links");

    let response = server
        .post_auth("/api/settings", token, &json!({ "hide_branding": true }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Upgrade through a signed webhook, then the same change is accepted
    let body = subscription_webhook(&auth.user.id);
    let signature = sign(TEST_WEBHOOK_SECRET, &body).unwrap();
    let response = server
        .post_raw("/api/webhook", body, &[(SIGNATURE_HEADER, signature.as_str())])
        .await
        .unwrap();
    let ack: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ack["status"], "applied");

    let response = server.get_auth("/api/v1/billing/subscription", token).await.unwrap();
    let subscription: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(subscription["plan"], "pro");

    let response = server
        .post_auth("/api/settings", token, &json!({ "hide_branding": true }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/{}", auth.user.username)).await.unwrap();
    let profile: PublicProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!profile.show_branding);
}

#[tokio::test]
async fn test_webhook_rejects_bad_signature() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let body = subscription_webhook(&auth.user.id);

    let response = server.post_raw("/api/webhook", body.clone(), &[]).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let forged = sign("not-the-secret", &body).unwrap();
    let response = server
        .post_raw("/api/webhook", body, &[(SIGNATURE_HEADER, forged.as_str())])
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.get_auth("/api/v1/billing/subscription", &auth.access_token).await.unwrap();
    let subscription: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(subscription["plan"], "free");
}

#[tokio::test]
async fn test_webhook_ignores_other_events() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let body = serde_json::to_vec(&json!({
        "meta": { "event_name": "order_created" },
        "data": { "type": "orders", "id": 991, "attributes": { "total": 900 } }
    }))
    .unwrap();
    let signature = sign(TEST_WEBHOOK_SECRET, &body).unwrap();

    let response = server
        .post_raw("/api/webhook", body, &[(SIGNATURE_HEADER, signature.as_str())])
        .await
        .unwrap();
    let ack: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ack["status"], "ignored");
}
