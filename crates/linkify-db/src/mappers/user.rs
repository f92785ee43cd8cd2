//! User entity <-> model mapper

use linkify_core::entities::User;
use linkify_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            username: model.username,
            display_name: model.display_name,
            bio: model.bio,
            image_url: model.image_url,
            image_public_id: model.image_public_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
