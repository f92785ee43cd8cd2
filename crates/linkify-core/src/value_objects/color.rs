//! Hex color used by theme and button appearance rows

use crate::error::DomainError;

/// A `#rgb` or `#rrggbb` color, stored lowercased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim();
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| DomainError::InvalidColor(value.to_string()))?;

        if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DomainError::InvalidColor(value.to_string()));
        }

        Ok(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
