//! Transfer service - Core business logic for sends and requests.
//!
//! This service handles:
//! - Transfer creation with ownership and balance validation
//! - Pending-request decisions (approve/reject) by the fund-holder
//! - Transfer history and pending queries scoped to a user's account
//!
//! # Balance Movement
//!
//! Creating or approving a transfer records it; it does not move money. The
//! caller applies the two balance replacements afterwards (see
//! [`crate::ledger::move_funds`]). Nothing here wraps those writes in a
//! database transaction.

use crate::{
    error::AppError,
    ledger,
    models::transfer::{NewTransfer, Transfer, TransferStatus, TransferType},
    services::account_service,
    store::Store,
};

/// Entire transfer history across all accounts.
pub async fn all_transfers(store: &dyn Store) -> Result<Vec<Transfer>, AppError> {
    store.list_transfers().await
}

/// Transfers involving the user's account, newest first.
pub async fn history_for_user(store: &dyn Store, user_id: i32) -> Result<Vec<Transfer>, AppError> {
    let account = account_service::account_for_user(store, user_id).await?;
    store.transfers_for_account(account.account_id).await
}

/// Pending requests waiting on the user's approval.
pub async fn pending_for_user(store: &dyn Store, user_id: i32) -> Result<Vec<Transfer>, AppError> {
    let account = account_service::account_for_user(store, user_id).await?;
    store.pending_for_fund_holder(account.account_id).await
}

/// One transfer, visible only if the user's account is on either side.
///
/// Returns `TransferNotFound` rather than `Forbidden` for someone else's
/// transfer, so ids of other users' transfers are not confirmed.
pub async fn transfer_for_user(
    store: &dyn Store,
    user_id: i32,
    transfer_id: i32,
) -> Result<Transfer, AppError> {
    let account = account_service::account_for_user(store, user_id).await?;

    let transfer = store
        .transfer_by_id(transfer_id)
        .await?
        .ok_or(AppError::TransferNotFound)?;

    if !transfer.involves(account.account_id) {
        return Err(AppError::TransferNotFound);
    }

    Ok(transfer)
}

/// Record a new send or request on behalf of `user_id`.
///
/// # Process
///
/// 1. Shape checks: positive whole-cent amount, distinct accounts
/// 2. Ownership: a sender must own `account_from`, a requester `account_to`
/// 3. Counterparty account must exist
/// 4. Sends only: the sender's balance must cover the amount
/// 5. Insert with the type's initial status (Send → Approved, Request → Pending)
///
/// Every check runs before the insert, so a rejected send writes nothing.
pub async fn create_transfer(
    store: &dyn Store,
    user_id: i32,
    new_transfer: NewTransfer,
) -> Result<Transfer, AppError> {
    ledger::validate_new_transfer(&new_transfer)?;

    let own = account_service::account_for_user(store, user_id).await?;

    let counterparty = match new_transfer.transfer_type {
        TransferType::Send if new_transfer.account_from == own.account_id => {
            new_transfer.account_to
        }
        TransferType::Request if new_transfer.account_to == own.account_id => {
            new_transfer.account_from
        }
        _ => return Err(AppError::Forbidden),
    };
    account_service::account_by_id(store, counterparty).await?;

    if new_transfer.transfer_type == TransferType::Send {
        ledger::ensure_covers(own.balance, new_transfer.amount)?;
    }

    let status = new_transfer.transfer_type.initial_status();
    let transfer = store
        .insert_transfer(&new_transfer, status)
        .await?
        .ok_or_else(|| AppError::CreationFailed("Transfer could not be created".to_string()))?;

    tracing::info!(
        transfer_id = transfer.transfer_id,
        transfer_type = %transfer.transfer_type,
        account_from = transfer.account_from,
        account_to = transfer.account_to,
        amount = %transfer.amount,
        "Transfer created"
    );

    Ok(transfer)
}

/// Approve or reject a pending request.
///
/// Only the fund-holder (owner of `account_from`) may decide. The status
/// write is conditional on the transfer still being `Pending`, so a second
/// decision fails even if two arrive at once.
///
/// # Errors
///
/// - `TransferNotFound`: unknown transfer or not visible to the user
/// - `Forbidden`: the user is the requester, not the fund-holder
/// - `Ledger(InvalidTransition)`: not a pending request, or target not a decision
/// - `UpdateFailed`: the row was decided between the read and the write
pub async fn decide_transfer(
    store: &dyn Store,
    user_id: i32,
    transfer_id: i32,
    next: TransferStatus,
) -> Result<Transfer, AppError> {
    let transfer = transfer_for_user(store, user_id, transfer_id).await?;
    let own = account_service::account_for_user(store, user_id).await?;

    if transfer.account_from != own.account_id {
        return Err(AppError::Forbidden);
    }

    ledger::transition(transfer.transfer_type, transfer.transfer_status, next)?;

    let rows = store
        .set_transfer_status(transfer_id, TransferStatus::Pending, next)
        .await?;
    if rows == 0 {
        return Err(AppError::UpdateFailed(format!(
            "Failed to update status for transfer ID {transfer_id}"
        )));
    }

    tracing::info!(transfer_id, status = %next, "Transfer decided");

    store
        .transfer_by_id(transfer_id)
        .await?
        .ok_or(AppError::TransferNotFound)
}
