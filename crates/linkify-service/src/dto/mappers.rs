//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use linkify_core::entities::{
    Appearance, Form, FormSubmission, Link, SocialLink, Testimonial, User,
};
use linkify_core::Plan;

use super::responses::{
    AppearanceResponse, ButtonStyleResponse, CurrentUserResponse, FormResponse,
    FormSubmissionResponse, LayoutResponse, LinkResponse, PublicLinkResponse,
    PublicTestimonialResponse, SettingsResponse, SocialLinkResponse, TestimonialResponse,
    ThemeResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl CurrentUserResponse {
    /// The plan is resolved from the subscription, not stored on the user
    pub fn from_user(user: &User, plan: Plan) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            bio: user.bio.clone(),
            image_url: user.image_url.clone(),
            plan,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Link Mappers
// ============================================================================

impl From<&Link> for LinkResponse {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id.to_string(),
            section_id: link.section_id.to_string(),
            text: link.text.clone(),
            url: link.url.clone(),
            thumbnail_url: link.thumbnail_url.clone(),
            hidden: link.hidden,
            index: link.index,
        }
    }
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self::from(&link)
    }
}

impl From<&Link> for PublicLinkResponse {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id.to_string(),
            text: link.text.clone(),
            url: link.url.clone(),
            thumbnail_url: link.thumbnail_url.clone(),
        }
    }
}

impl From<&SocialLink> for SocialLinkResponse {
    fn from(social_link: &SocialLink) -> Self {
        Self {
            id: social_link.id.to_string(),
            platform: social_link.platform,
            url: social_link.href(),
            index: social_link.index,
        }
    }
}

impl From<SocialLink> for SocialLinkResponse {
    fn from(social_link: SocialLink) -> Self {
        Self::from(&social_link)
    }
}

// ============================================================================
// Appearance Mapper
// ============================================================================

impl From<&Appearance> for AppearanceResponse {
    fn from(appearance: &Appearance) -> Self {
        let Appearance { theme, layout, button, settings } = appearance;
        Self {
            theme: ThemeResponse {
                background_color: theme.background_color.clone(),
                text_color: theme.text_color.clone(),
                font: theme.font.clone(),
            },
            layout: LayoutResponse {
                style: layout.style,
                image_shape: layout.image_shape,
            },
            button: ButtonStyleResponse {
                variant: button.variant,
                radius: button.radius,
                background_color: button.background_color.clone(),
                text_color: button.text_color.clone(),
            },
            settings: SettingsResponse {
                seo_title: settings.seo_title.clone(),
                seo_description: settings.seo_description.clone(),
                social_icon_placement: settings.social_icon_placement,
                hide_branding: settings.hide_branding,
            },
        }
    }
}

impl From<Appearance> for AppearanceResponse {
    fn from(appearance: Appearance) -> Self {
        Self::from(&appearance)
    }
}

// ============================================================================
// Testimonial Mappers
// ============================================================================

impl From<&Testimonial> for TestimonialResponse {
    fn from(testimonial: &Testimonial) -> Self {
        Self {
            id: testimonial.id.to_string(),
            name: testimonial.name.clone(),
            email: testimonial.email.clone(),
            rating: testimonial.rating,
            message: testimonial.message.clone(),
            should_show: testimonial.should_show,
            index: testimonial.index,
            created_at: testimonial.created_at,
        }
    }
}

impl From<Testimonial> for TestimonialResponse {
    fn from(testimonial: Testimonial) -> Self {
        Self::from(&testimonial)
    }
}

impl From<&Testimonial> for PublicTestimonialResponse {
    fn from(testimonial: &Testimonial) -> Self {
        Self {
            id: testimonial.id.to_string(),
            name: testimonial.name.clone(),
            rating: testimonial.rating,
            message: testimonial.message.clone(),
            created_at: testimonial.created_at,
        }
    }
}

// ============================================================================
// Form Mappers
// ============================================================================

impl From<&Form> for FormResponse {
    fn from(form: &Form) -> Self {
        Self {
            id: Some(form.id.to_string()),
            title: form.title.clone(),
            description: form.description.clone(),
            button_text: form.button_text.clone(),
            collect_phone: form.collect_phone,
            collect_subject: form.collect_subject,
            enabled: form.enabled,
        }
    }
}

impl From<Form> for FormResponse {
    fn from(form: Form) -> Self {
        Self::from(&form)
    }
}

impl From<&FormSubmission> for FormSubmissionResponse {
    fn from(submission: &FormSubmission) -> Self {
        Self {
            id: submission.id.to_string(),
            name: submission.name.clone(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            subject: submission.subject.clone(),
            message: submission.message.clone(),
            created_at: submission.created_at,
        }
    }
}

impl From<FormSubmission> for FormSubmissionResponse {
    fn from(submission: FormSubmission) -> Self {
        Self::from(&submission)
    }
}
