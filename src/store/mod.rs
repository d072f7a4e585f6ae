//! Persistence boundary for users, accounts, transfers and tokens.
//!
//! The services talk to a [`Store`] rather than to a pool directly, so the
//! same business logic runs against Postgres in production and against the
//! in-memory store in tests.
//!
//! Store methods report raw outcomes (`Option`, rows affected). Turning an
//! absent row into not-found, or zero rows into update-failed, is the
//! service layer's job.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    error::AppError,
    models::{
        account::Account,
        transfer::{NewTransfer, Transfer, TransferStatus},
        user::{User, UserCredentials},
    },
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Round trip to the backing store.
    async fn ping(&self) -> Result<(), AppError>;

    /// Create a user together with their account.
    ///
    /// Fails with `UsernameTaken` when the username already exists.
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        starting_balance: Decimal,
    ) -> Result<User, AppError>;

    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>, AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    async fn user_by_id(&self, user_id: i32) -> Result<Option<User>, AppError>;

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn store_token(&self, token_hash: &str, user_id: i32) -> Result<(), AppError>;

    async fn user_for_token(&self, token_hash: &str) -> Result<Option<User>, AppError>;

    async fn list_accounts(&self) -> Result<Vec<Account>, AppError>;

    async fn account_by_user_id(&self, user_id: i32) -> Result<Option<Account>, AppError>;

    async fn account_by_id(&self, account_id: i32) -> Result<Option<Account>, AppError>;

    /// Overwrite a balance. Returns the number of rows affected.
    async fn replace_balance(&self, account_id: i32, balance: Decimal) -> Result<u64, AppError>;

    async fn list_transfers(&self) -> Result<Vec<Transfer>, AppError>;

    /// Transfers with the account on either side, newest first.
    async fn transfers_for_account(&self, account_id: i32) -> Result<Vec<Transfer>, AppError>;

    /// Pending transfers where the account is the fund-holder.
    async fn pending_for_fund_holder(&self, account_id: i32) -> Result<Vec<Transfer>, AppError>;

    async fn transfer_by_id(&self, transfer_id: i32) -> Result<Option<Transfer>, AppError>;

    /// Record a transfer with the given status. `None` if no row came back.
    async fn insert_transfer(
        &self,
        transfer: &NewTransfer,
        status: TransferStatus,
    ) -> Result<Option<Transfer>, AppError>;

    /// Set the status only if the row is still in `expected`.
    ///
    /// Returns the number of rows affected; zero means the transfer does not
    /// exist or was already decided.
    async fn set_transfer_status(
        &self,
        transfer_id: i32,
        expected: TransferStatus,
        next: TransferStatus,
    ) -> Result<u64, AppError>;
}
