//! Contact form entity and its submissions

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

use super::Owned;

/// Contact form shown on a profile (one per user)
///
/// Name, email and message are always collected; phone and subject are
/// optional fields the owner can switch on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub title: String,
    pub description: Option<String>,
    pub button_text: String,
    pub collect_phone: bool,
    pub collect_subject: bool,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Form {
    /// A disabled form with default copy
    pub fn new(id: Snowflake, user_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            title: "Contact me".to_string(),
            description: None,
            button_text: "Send".to_string(),
            collect_phone: false,
            collect_subject: false,
            enabled: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Owned for Form {
    fn owner_id(&self) -> Snowflake {
        self.user_id
    }
}

/// A visitor's response to a [`Form`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub id: Snowflake,
    pub form_id: Snowflake,
    pub user_id: Snowflake,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl FormSubmission {
    /// Build a submission, dropping fields the form does not collect
    pub fn for_form(
        id: Snowflake,
        form: &Form,
        name: String,
        email: String,
        phone: Option<String>,
        subject: Option<String>,
        message: String,
    ) -> Self {
        Self {
            id,
            form_id: form.id,
            user_id: form.user_id,
            name,
            email,
            phone: phone.filter(|_| form.collect_phone),
            subject: subject.filter(|_| form.collect_subject),
            message,
            created_at: Utc::now(),
        }
    }
}

impl Owned for FormSubmission {
    fn owner_id(&self) -> Snowflake {
        self.user_id
    }
}
