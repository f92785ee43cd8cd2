//! Username - the public slug a profile is served under (`/{username}`)

use std::fmt;

use crate::error::DomainError;

/// Minimum username length
pub const USERNAME_MIN_LEN: usize = 3;
/// Maximum username length
pub const USERNAME_MAX_LEN: usize = 30;

/// Slugs that collide with server routes or would be misleading as a profile
const RESERVED: &[&str] = &[
    "admin",
    "api",
    "app",
    "assets",
    "auth",
    "dashboard",
    "health",
    "help",
    "linkify",
    "login",
    "logout",
    "pricing",
    "public",
    "register",
    "settings",
    "signup",
    "static",
    "support",
];

/// A validated, lowercased username
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Normalize and validate a username
    ///
    /// Input is trimmed and lowercased. Allowed characters are ASCII letters,
    /// digits, `_` and `-`; it may not start or end with a separator.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim().to_ascii_lowercase();

        if value.len() < USERNAME_MIN_LEN || value.len() > USERNAME_MAX_LEN {
            return Err(DomainError::InvalidUsername(format!(
                "must be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters"
            )));
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            return Err(DomainError::InvalidUsername(
                "only letters, numbers, '_' and '-' are allowed".to_string(),
            ));
        }

        if value.starts_with(['_', '-']) || value.ends_with(['_', '-']) {
            return Err(DomainError::InvalidUsername(
                "cannot start or end with '_' or '-'".to_string(),
            ));
        }

        if RESERVED.contains(&value.as_str()) {
            return Err(DomainError::ReservedUsername(value));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
