//! Section, link and social link mappers

use linkify_core::entities::{Link, Section, SocialLink, SocialPlatform};
use linkify_core::value_objects::Snowflake;

use crate::models::{LinkModel, SectionModel, SocialLinkModel};

impl From<SectionModel> for Section {
    fn from(model: SectionModel) -> Self {
        Section {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            name: model.name,
            index: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<LinkModel> for Link {
    fn from(model: LinkModel) -> Self {
        Link {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            section_id: Snowflake::new(model.section_id),
            text: model.text,
            url: model.url,
            thumbnail_url: model.thumbnail_url,
            thumbnail_public_id: model.thumbnail_public_id,
            hidden: model.hidden,
            index: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<SocialLinkModel> for SocialLink {
    fn from(model: SocialLinkModel) -> Self {
        SocialLink {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            // Rows written by older clients may carry platforms we no longer list
            platform: model.platform.parse().unwrap_or(SocialPlatform::Website),
            url: model.url,
            index: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
