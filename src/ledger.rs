//! Transfer-authorization rules and balance arithmetic.
//!
//! Everything here is pure: no I/O, no store access. The server uses these
//! checks to guard what it persists, and the console client uses the same
//! checks (plus [`move_funds`]) before it issues the two balance writes of a
//! fund movement.

use rust_decimal::Decimal;

use crate::models::{
    account::Account,
    transfer::{NewTransfer, TransferStatus, TransferType},
};

/// A transfer or balance change that breaks a ledger rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Cannot transfer between an account and itself")]
    SelfTransfer,

    #[error("Not enough TE Bucks in account")]
    InsufficientFunds,

    #[error("Balance cannot be negative")]
    NegativeBalance,

    #[error("Amounts are limited to whole cents")]
    SubCentPrecision,

    #[error("Balance cannot exceed 99999999999.99")]
    BalanceOutOfRange,

    #[error("Cannot move a {kind} transfer from {current} to {requested}")]
    InvalidTransition {
        kind: TransferType,
        current: TransferStatus,
        requested: TransferStatus,
    },
}

/// Largest balance an account column can hold, `NUMERIC(13, 2)`.
// 9_999_999_999_999 scaled by 2, i.e. 99_999_999_999.99
pub const MAX_BALANCE: Decimal = Decimal::from_parts(1316134911, 2328, 0, false, 2);

/// New balances of both sides after a fund movement.
#[derive(Debug, Clone, PartialEq)]
pub struct FundMovement {
    pub from: Account,
    pub to: Account,
}

/// Money is stored in cents; anything finer would be rounded on write.
fn ensure_cents(value: Decimal) -> Result<(), LedgerError> {
    if value.normalize().scale() > 2 {
        return Err(LedgerError::SubCentPrecision);
    }
    Ok(())
}

pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount);
    }
    ensure_cents(amount)
}

/// Fails with `InsufficientFunds` unless `balance` covers `amount`.
pub fn ensure_covers(balance: Decimal, amount: Decimal) -> Result<(), LedgerError> {
    if amount > balance {
        return Err(LedgerError::InsufficientFunds);
    }
    Ok(())
}

/// Checks a send from `own` to `account_to` before anything is written.
///
/// Order matters for the user-facing message: self-transfer first, then the
/// amount, then the balance.
pub fn validate_send(own: &Account, account_to: i32, amount: Decimal) -> Result<(), LedgerError> {
    if own.account_id == account_to {
        return Err(LedgerError::SelfTransfer);
    }
    validate_amount(amount)?;
    ensure_covers(own.balance, amount)
}

/// Checks a request for `amount` from the fund-holder `account_from`.
///
/// No balance check: the fund-holder's balance is only tested on approval.
pub fn validate_request(
    own_account_id: i32,
    account_from: i32,
    amount: Decimal,
) -> Result<(), LedgerError> {
    if own_account_id == account_from {
        return Err(LedgerError::SelfTransfer);
    }
    validate_amount(amount)
}

/// Shape checks for a transfer about to be recorded.
pub fn validate_new_transfer(transfer: &NewTransfer) -> Result<(), LedgerError> {
    if transfer.account_from == transfer.account_to {
        return Err(LedgerError::SelfTransfer);
    }
    validate_amount(transfer.amount)
}

pub fn validate_balance(balance: Decimal) -> Result<(), LedgerError> {
    if balance < Decimal::ZERO {
        return Err(LedgerError::NegativeBalance);
    }
    if balance > MAX_BALANCE {
        return Err(LedgerError::BalanceOutOfRange);
    }
    ensure_cents(balance)
}

/// Debits `amount` from `from` and credits it to `to`.
///
/// Returns the two accounts with their new balances; persisting them is the
/// caller's job. The sum of both balances is unchanged.
pub fn move_funds(
    from: &Account,
    to: &Account,
    amount: Decimal,
) -> Result<FundMovement, LedgerError> {
    if from.account_id == to.account_id {
        return Err(LedgerError::SelfTransfer);
    }
    validate_amount(amount)?;
    ensure_covers(from.balance, amount)?;

    let debited = from
        .balance
        .checked_sub(amount)
        .ok_or(LedgerError::InsufficientFunds)?;
    let credited = to
        .balance
        .checked_add(amount)
        .filter(|balance| *balance <= MAX_BALANCE)
        .ok_or(LedgerError::BalanceOutOfRange)?;

    Ok(FundMovement {
        from: Account {
            balance: debited,
            ..from.clone()
        },
        to: Account {
            balance: credited,
            ..to.clone()
        },
    })
}

/// Decides whether a transfer may move from `current` to `next`.
///
/// Only pending requests can be decided, and only to `Approved` or
/// `Rejected`. Sends are created approved and never change.
pub fn transition(
    kind: TransferType,
    current: TransferStatus,
    next: TransferStatus,
) -> Result<TransferStatus, LedgerError> {
    match (kind, current, next) {
        (TransferType::Request, TransferStatus::Pending, TransferStatus::Approved)
        | (TransferType::Request, TransferStatus::Pending, TransferStatus::Rejected) => Ok(next),
        _ => Err(LedgerError::InvalidTransition {
            kind,
            current,
            requested: next,
        }),
    }
}
