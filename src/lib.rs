//! TEnmo - peer-to-peer TE Bucks transfers.
//!
//! The crate holds both halves of the system:
//!
//! - the REST server (`app`, `handlers`, `middleware`, `services`, `store`)
//! - the console client (`client`), which drives the server over HTTP and
//!   performs the two-sided balance arithmetic itself
//!
//! Both halves share the `models` and the transfer rules in `ledger`.

pub mod app;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
