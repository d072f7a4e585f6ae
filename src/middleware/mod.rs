//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers. They can
//! short-circuit requests (reject unauthenticated ones) or attach context.

/// Bearer-token authentication middleware
pub mod auth;
