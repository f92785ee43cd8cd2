//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, TokenPair, TokenType};
pub use password::{
    hash_password, validate_password_strength, verify_password, MAX_PASSWORD_LEN,
    MIN_PASSWORD_LEN,
};
