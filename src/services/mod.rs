//! Business logic services.
//!
//! Services contain the business logic separated from HTTP handlers.
//! They validate requests, talk to the store, and map missing rows to
//! not-found/update-failed errors.

pub mod account_service;
pub mod auth_service;
pub mod transfer_service;
pub mod user_service;
