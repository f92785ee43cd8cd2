//! Profile service - the signed-in user's own account

use linkify_core::entities::User;
use linkify_core::error::DomainError;
use linkify_core::{Snowflake, Username};
use tracing::{info, instrument};

use crate::dto::{ChangeUsernameRequest, CurrentUserResponse, UpdateProfileRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::media::MediaService;

pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl<'a> ProfileService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub(crate) async fn load_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self.load_user(user_id).await?;
        let plan = self.ctx.current_plan(user_id).await?;
        Ok(CurrentUserResponse::from_user(&user, plan))
    }

    /// Update display name, bio and image
    ///
    /// An empty string clears a text field. Setting or removing the image
    /// deletes the previous asset after the row is saved.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self.load_user(user_id).await?;

        if let Some(display_name) = request.display_name {
            user.display_name = non_blank(display_name);
        }
        if let Some(bio) = request.bio {
            user.bio = non_blank(bio);
        }

        let replaced = match (request.image_url, request.image_public_id) {
            (Some(url), Some(public_id)) => user.set_image(Some(url), Some(public_id)),
            (Some(_), None) | (None, Some(_)) => {
                return Err(ServiceError::validation(
                    "image_url and image_public_id must be provided together",
                ));
            }
            (None, None) if request.remove_image => user.set_image(None, None),
            (None, None) => None,
        };

        self.ctx.user_repo().update(&user).await?;
        MediaService::new(self.ctx).discard(replaced.as_deref()).await;

        info!(user_id = %user_id, "Profile updated");

        let plan = self.ctx.current_plan(user_id).await?;
        Ok(CurrentUserResponse::from_user(&user, plan))
    }

    /// Move the public page to a new slug
    #[instrument(skip(self, request))]
    pub async fn change_username(
        &self,
        user_id: Snowflake,
        request: ChangeUsernameRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let username = Username::parse(&request.username)?;
        let mut user = self.load_user(user_id).await?;

        if user.username != username.as_str() {
            if self.ctx.user_repo().username_exists(username.as_str()).await? {
                return Err(DomainError::UsernameTaken(username.into_inner()).into());
            }
            user.set_username(username.into_inner());
            self.ctx.user_repo().update(&user).await?;
            info!(user_id = %user_id, username = %user.username, "Username changed");
        }

        let plan = self.ctx.current_plan(user_id).await?;
        Ok(CurrentUserResponse::from_user(&user, plan))
    }
}
