//! Integration test utilities for the Linkify API
//!
//! This crate provides helpers for running end-to-end tests against
//! a spawned REST API server.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
