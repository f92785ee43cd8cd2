//! Testimonial, form and analytics mappers

use linkify_core::entities::{EventKind, Form, FormSubmission, Testimonial};
use linkify_core::value_objects::Snowflake;

use crate::models::{FormModel, FormSubmissionModel, TestimonialModel};

impl From<TestimonialModel> for Testimonial {
    fn from(model: TestimonialModel) -> Self {
        Testimonial {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            name: model.name,
            email: model.email,
            rating: model.rating,
            message: model.message,
            should_show: model.should_show,
            index: model.position,
            created_at: model.created_at,
        }
    }
}

impl From<FormModel> for Form {
    fn from(model: FormModel) -> Self {
        Form {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            title: model.title,
            description: model.description,
            button_text: model.button_text,
            collect_phone: model.collect_phone,
            collect_subject: model.collect_subject,
            enabled: model.enabled,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<FormSubmissionModel> for FormSubmission {
    fn from(model: FormSubmissionModel) -> Self {
        FormSubmission {
            id: Snowflake::new(model.id),
            form_id: Snowflake::new(model.form_id),
            user_id: Snowflake::new(model.user_id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            subject: model.subject,
            message: model.message,
            created_at: model.created_at,
        }
    }
}

/// Event kind column; the CHECK constraint keeps this exhaustive
pub fn parse_event_kind(raw: &str) -> EventKind {
    raw.parse().unwrap_or(EventKind::View)
}
