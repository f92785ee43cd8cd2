//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod analytics;
pub mod appearance;
pub mod auth;
pub mod billing;
pub mod forms;
pub mod health;
pub mod links;
pub mod media;
pub mod public;
pub mod sections;
pub mod social_links;
pub mod testimonials;
pub mod users;
