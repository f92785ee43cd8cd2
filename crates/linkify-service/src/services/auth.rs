//! Authentication service
//!
//! Handles user registration, login and token refresh. Tokens are stateless
//! JWTs; a refresh simply mints a new pair for a still-existing user.

use linkify_common::auth::{hash_password, validate_password_strength, verify_password};
use linkify_common::AppError;
use linkify_core::entities::{Appearance, User};
use linkify_core::error::DomainError;
use linkify_core::{Plan, Username};
use tracing::{info, instrument, warn};

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user together with their default appearance
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let username = Username::parse(&request.username)?;
        validate_password_strength(&request.password)?;

        let email = request.email.trim().to_ascii_lowercase();
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.user_repo().username_exists(username.as_str()).await? {
            return Err(DomainError::UsernameTaken(username.into_inner()).into());
        }

        let password_hash = hash_password(&request.password)?;

        let user = User::new(self.ctx.generate_id(), email, username.into_inner());
        let appearance = Appearance::default_for(user.id);
        self.ctx.user_repo().create(&user, &password_hash, &appearance).await?;

        info!(user_id = %user.id, "User registered");

        // A brand new account never has a subscription
        self.issue_tokens(&user, Plan::Free)
    }

    /// Login with email and password
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        verify_password(&request.password, &password_hash).inspect_err(|_| {
            warn!(user_id = %user.id, "Login failed: wrong password");
        })?;

        info!(user_id = %user.id, "User logged in");

        let plan = self.ctx.current_plan(user.id).await?;
        self.issue_tokens(&user, plan)
    }

    /// Exchange a refresh token for a new token pair
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self.ctx.jwt_service().verify_refresh(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        // Tokens of deleted accounts stop working immediately
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        let plan = self.ctx.current_plan(user.id).await?;
        self.issue_tokens(&user, plan)
    }

    fn issue_tokens(&self, user: &User, plan: Plan) -> ServiceResult<AuthResponse> {
        let pair = self.ctx.jwt_service().issue(user.id)?;

        Ok(AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
            CurrentUserResponse::from_user(user, plan),
        ))
    }
}
