//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Random per-process prefix so reruns against the same database never collide
fn run_id() -> &'static str {
    static RUN_ID: OnceLock<String> = OnceLock::new();
    RUN_ID.get_or_init(|| uuid::Uuid::new_v4().simple().to_string()[..10].to_string())
}

/// Get a unique suffix for test data
pub fn unique_suffix() -> String {
    format!("{}{}", run_id(), COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("u{suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// Current user
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub plan: String,
}

#[derive(Debug, Serialize)]
pub struct CreateSectionRequest {
    pub name: String,
}

impl CreateSectionRequest {
    pub fn named(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

#[derive(Debug, Deserialize)]
pub struct SectionResponse {
    pub id: String,
    pub name: String,
    pub index: i32,
    pub links: Vec<LinkResponse>,
}

#[derive(Debug, Serialize)]
pub struct CreateLinkRequest {
    pub text: String,
    pub url: String,
}

impl CreateLinkRequest {
    pub fn new(text: &str, url: &str) -> Self {
        Self {
            text: text.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LinkResponse {
    pub id: String,
    pub section_id: String,
    pub text: String,
    pub url: String,
    pub hidden: bool,
    pub index: i32,
}

/// Body of every reorder endpoint
#[derive(Debug, Serialize)]
pub struct ReorderRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SocialLinkResponse {
    pub id: String,
    pub platform: String,
    pub url: String,
    pub index: i32,
}

#[derive(Debug, Serialize)]
pub struct SubmitTestimonialRequest {
    pub name: String,
    pub rating: i16,
    pub message: String,
}

impl SubmitTestimonialRequest {
    pub fn five_stars() -> Self {
        Self {
            name: "Happy Client".to_string(),
            rating: 5,
            message: "Great to work with".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TestimonialResponse {
    pub id: String,
    pub name: String,
    pub rating: i16,
    pub should_show: bool,
    pub index: i32,
}

#[derive(Debug, Serialize)]
pub struct UpsertFormRequest {
    pub title: String,
    pub button_text: String,
    pub collect_phone: bool,
    pub collect_subject: bool,
    pub enabled: bool,
}

impl UpsertFormRequest {
    pub fn enabled() -> Self {
        Self {
            title: "Work with me".to_string(),
            button_text: "Send".to_string(),
            collect_phone: false,
            collect_subject: true,
            enabled: true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitFormRequest {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl SubmitFormRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: "Visitor".to_string(),
            email: format!("visitor{suffix}@example.com"),
            subject: Some("Hello".to_string()),
            message: "I would like to book a session".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FormSubmissionResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub has_more: bool,
    pub before: Option<String>,
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionPage {
    pub data: Vec<FormSubmissionResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize)]
pub struct FormUsageResponse {
    pub plan: String,
    pub used: i64,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecordEventRequest {
    pub username: String,
    pub kind: String,
    pub link_id: Option<String>,
}

impl RecordEventRequest {
    pub fn view(username: &str) -> Self {
        Self {
            username: username.to_string(),
            kind: "view".to_string(),
            link_id: None,
        }
    }

    pub fn click(username: &str, link_id: &str) -> Self {
        Self {
            username: username.to_string(),
            kind: "click".to_string(),
            link_id: Some(link_id.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordEventResponse {
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct PublicSectionResponse {
    pub id: String,
    pub name: String,
    pub links: Vec<PublicLinkResponse>,
}

#[derive(Debug, Deserialize)]
pub struct PublicLinkResponse {
    pub id: String,
    pub text: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct PublicProfileResponse {
    pub username: String,
    pub display_name: String,
    pub sections: Vec<PublicSectionResponse>,
    pub social_links: Vec<SocialLinkResponse>,
    pub testimonials: Vec<serde_json::Value>,
    pub form: Option<serde_json::Value>,
    pub show_branding: bool,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
