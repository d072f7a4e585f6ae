//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, auth context)
//! 2. Delegates to a service
//! 3. Returns HTTP response (JSON, status code)

/// Account lookup and balance endpoints
pub mod accounts;
/// Registration and login endpoints
pub mod auth;
pub mod health;
/// Transfer endpoints
pub mod transfers;
/// User lookup endpoints
pub mod users;
