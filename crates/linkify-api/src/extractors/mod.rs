//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, pagination and
//! visitor context.

mod auth;
mod pagination;
mod path;
mod validated;
mod visit;

pub use auth::AuthUser;
pub use pagination::{Pagination, PaginationParams};
pub use path::IdPath;
pub use validated::ValidatedJson;
pub use visit::{viewed_cookie, Visitor, VIEWED_COOKIE};
