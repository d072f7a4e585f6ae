//! Console client.
//!
//! - `api`: one method per REST endpoint
//! - `teller`: send/request/approve orchestration, including the two-sided
//!   balance writes
//! - `console` / `app`: menus and prompts

pub mod api;
pub mod app;
pub mod config;
pub mod console;
pub mod teller;

pub use api::{ApiClient, AuthenticatedUser, ClientError};
pub use app::App;
pub use config::ClientConfig;
pub use console::Console;
pub use teller::{DirectoryEntry, Teller};
