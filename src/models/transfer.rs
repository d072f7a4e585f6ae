//! Transfer data models and API request types.
//!
//! This module defines:
//! - `TransferType` / `TransferStatus`: the two lookup enums
//! - `Transfer`: Database entity representing one transfer
//! - Request types for creating a transfer and deciding its status

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of transfer, stored as `transfer_type_id`.
///
/// - `Request` (1): asks the fund-holder for money, needs their approval
/// - `Send` (2): moves money immediately, created already approved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum TransferType {
    Request = 1,
    Send = 2,
}

impl TransferType {
    /// Status a freshly created transfer of this type starts in.
    pub fn initial_status(self) -> TransferStatus {
        match self {
            TransferType::Request => TransferStatus::Pending,
            TransferType::Send => TransferStatus::Approved,
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferType::Request => f.write_str("Request"),
            TransferType::Send => f.write_str("Send"),
        }
    }
}

/// Lifecycle state of a transfer, stored as `transfer_status_id`.
///
/// The only legal moves are `Pending -> Approved` and `Pending -> Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum TransferStatus {
    Pending = 1,
    Approved = 2,
    Rejected = 3,
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferStatus::Pending => f.write_str("Pending"),
            TransferStatus::Approved => f.write_str("Approved"),
            TransferStatus::Rejected => f.write_str("Rejected"),
        }
    }
}

/// Represents a transfer record from the database.
///
/// # Database Table
///
/// Maps to the `transfer` table. `account_from` is always the fund-holder
/// (the side debited once the transfer is approved) and `account_to` the
/// receiving side, for both sends and requests.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Transfer {
    /// Unique identifier for this transfer (seeded from 3001)
    pub transfer_id: i32,

    #[sqlx(rename = "transfer_type_id")]
    pub transfer_type: TransferType,

    #[sqlx(rename = "transfer_status_id")]
    pub transfer_status: TransferStatus,

    /// Fund-holder account
    pub account_from: i32,

    /// Receiving account
    pub account_to: i32,

    /// Amount moved on approval, always positive
    pub amount: Decimal,
}

impl Transfer {
    /// Whether the given account is on either side of this transfer.
    pub fn involves(&self, account_id: i32) -> bool {
        self.account_from == account_id || self.account_to == account_id
    }
}

/// Request body for creating a transfer.
///
/// The status is not part of the request: it always follows from the type
/// (see [`TransferType::initial_status`]).
///
/// # JSON Example
///
/// ```json
/// {
///   "transfer_type": "Request",
///   "account_from": 2002,
///   "account_to": 2001,
///   "amount": "30.00"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransfer {
    pub transfer_type: TransferType,
    pub account_from: i32,
    pub account_to: i32,
    pub amount: Decimal,
}

/// Request body for approving or rejecting a pending request.
///
/// # JSON Example
///
/// ```json
/// {
///   "transfer_status": "Approved"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTransferStatusRequest {
    pub transfer_status: TransferStatus,
}
