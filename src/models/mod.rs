//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request/response bodies shared by the server and the client.

/// Account and balance model
pub mod account;
/// Transfer model with its type/status lookups
pub mod transfer;
/// User and login model
pub mod user;
