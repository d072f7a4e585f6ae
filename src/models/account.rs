//! Account data models and API request types.
//!
//! This module defines:
//! - `Account`: Database entity holding a user's TE Bucks balance
//! - `UpdateBalanceRequest`: Request body for replacing a balance

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an account record from the database.
///
/// # Database Table
///
/// Maps to the `account` table. Each account:
/// - Belongs to exactly one user (via `user_id`)
/// - Has a balance stored as `NUMERIC(13, 2)`
///
/// # Balance Storage
///
/// Balances are exact decimals, never floats. The column carries a
/// `CHECK (balance >= 0)` constraint, so a negative balance can never be
/// persisted even if a caller skips validation.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for this account (seeded from 2001)
    pub account_id: i32,

    /// Owner of this account (one account per user)
    pub user_id: i32,

    /// Current balance in TE Bucks
    pub balance: Decimal,
}

/// Request body for replacing an account balance.
///
/// The service persists whatever balance it receives; the caller is
/// responsible for the debit/credit arithmetic.
///
/// # JSON Example
///
/// ```json
/// {
///   "balance": "970.00"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBalanceRequest {
    /// New balance for the account
    pub balance: Decimal,
}
