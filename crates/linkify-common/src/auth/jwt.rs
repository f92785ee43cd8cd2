//! Stateless JWT access and refresh tokens

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use linkify_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub typ: TokenType,
}

impl Claims {
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: i64,
    refresh_ttl: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_ttl: i64, refresh_ttl: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue a fresh access/refresh pair
    pub fn issue(&self, user_id: Snowflake) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.sign(user_id, TokenType::Access)?,
            refresh_token: self.sign(user_id, TokenType::Refresh)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_ttl,
        })
    }

    fn sign(&self, user_id: Snowflake, typ: TokenType) -> Result<String, AppError> {
        let now = Utc::now();
        let ttl = match typ {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl)).timestamp(),
            typ,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to encode JWT: {e}")))
    }

    fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default()).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            },
        )?;

        if data.claims.typ != expected {
            return Err(AppError::InvalidToken);
        }
        Ok(data.claims)
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, TokenType::Access)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, TokenType::Refresh)
    }

    /// Exchange a refresh token for a new pair
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let user_id = self.verify_refresh(refresh_token)?.user_id()?;
        self.issue(user_id)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 900, 86_400)
    }

    #[test]
    fn test_issue_and_verify_access() {
        let jwt = service();
        let pair = jwt.issue(Snowflake::new(4242)).unwrap();

        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 900);

        let claims = jwt.verify_access(&pair.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), Snowflake::new(4242));
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let jwt = service();
        let pair = jwt.issue(Snowflake::new(1)).unwrap();

        assert!(matches!(jwt.verify_access(&pair.refresh_token), Err(AppError::InvalidToken)));
        assert!(matches!(jwt.verify_refresh(&pair.access_token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_refresh_issues_new_pair() {
        let jwt = service();
        let pair = jwt.issue(Snowflake::new(7)).unwrap();
        let refreshed = jwt.refresh(&pair.refresh_token).unwrap();

        let claims = jwt.verify_access(&refreshed.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), Snowflake::new(7));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let pair = service().issue(Snowflake::new(7)).unwrap();
        let other = JwtService::new("a-completely-different-secret", 900, 86_400);
        assert!(matches!(other.verify_access(&pair.access_token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(service().verify_access("not.a.jwt"), Err(AppError::InvalidToken)));
    }
}
