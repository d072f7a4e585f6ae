//! Account service - lookups and balance replacement.
//!
//! The service never computes balances. `replace_balance` persists the value
//! it is given after checking it is non-negative; debit/credit arithmetic
//! belongs to the caller.

use rust_decimal::Decimal;

use crate::{error::AppError, ledger, models::account::Account, store::Store};

/// List every account.
///
/// # Errors
///
/// - `AccountListNotFound`: no accounts exist yet
pub async fn list_accounts(store: &dyn Store) -> Result<Vec<Account>, AppError> {
    let accounts = store.list_accounts().await?;

    if accounts.is_empty() {
        return Err(AppError::AccountListNotFound);
    }

    Ok(accounts)
}

/// Account owned by a user.
pub async fn account_for_user(store: &dyn Store, user_id: i32) -> Result<Account, AppError> {
    store
        .account_by_user_id(user_id)
        .await?
        .ok_or(AppError::AccountNotFound)
}

pub async fn account_by_id(store: &dyn Store, account_id: i32) -> Result<Account, AppError> {
    store
        .account_by_id(account_id)
        .await?
        .ok_or(AppError::AccountNotFound)
}

/// Overwrite an account balance and return the stored account.
///
/// # Errors
///
/// - `Ledger(NegativeBalance)`: the new balance is below zero
/// - `Ledger(SubCentPrecision)`, `Ledger(BalanceOutOfRange)`: the new balance
///   does not fit the account column
/// - `UpdateFailed`: no row was updated (unknown account)
pub async fn replace_balance(
    store: &dyn Store,
    account_id: i32,
    balance: Decimal,
) -> Result<Account, AppError> {
    ledger::validate_balance(balance)?;

    let rows = store.replace_balance(account_id, balance).await?;
    if rows == 0 {
        return Err(AppError::UpdateFailed(format!(
            "Failed to update balance for account ID {account_id}"
        )));
    }

    tracing::info!(account_id, %balance, "Account balance replaced");

    account_by_id(store, account_id).await
}
