//! Service layer for business logic
//!
//! Shared by the HTTP handlers and anything embedding the crate.

mod link_service;

pub use link_service::*;
