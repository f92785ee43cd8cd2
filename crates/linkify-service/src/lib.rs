//! # linkify-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Services borrow a [`ServiceContext`] and talk to storage and third-party
//! APIs only through the ports defined in `linkify-core`.

pub mod dto;
pub mod services;

pub use services::{
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, ServiceSettings,
};
