//! Account HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - GET /user/all/account - List all accounts
//! - GET /user/{id}/account - Account owned by a user
//! - GET /user/{id}/account/{account_id} - Account by id
//! - PUT /user/{id}/account/{account_id} - Replace an account balance

use crate::{
    app::AppState,
    error::AppError,
    middleware::auth::AuthContext,
    models::account::{Account, UpdateBalanceRequest},
    services::account_service,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};

/// List every account.
///
/// The console client uses this to print the account directory before a
/// send or request.
///
/// # Response
///
/// - **Success (200 OK)**: array of accounts
/// - **Error (404)**: no accounts exist
///
/// ```json
/// [
///   { "account_id": 2001, "user_id": 1001, "balance": "1000.00" },
///   { "account_id": 2002, "user_id": 1002, "balance": "970.00" }
/// ]
/// ```
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = account_service::list_accounts(state.store.as_ref()).await?;

    Ok(Json(accounts))
}

/// Account owned by the authenticated user.
///
/// # Response
///
/// - **Success (200 OK)**: the account
/// - **Error (403)**: `{id}` is not the authenticated user
/// - **Error (404)**: the user has no account
pub async fn get_account_for_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<i32>,
) -> Result<Json<Account>, AppError> {
    auth.ensure_user(user_id)?;

    let account = account_service::account_for_user(state.store.as_ref(), user_id).await?;

    Ok(Json(account))
}

/// Any account by its id.
pub async fn get_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((user_id, account_id)): Path<(i32, i32)>,
) -> Result<Json<Account>, AppError> {
    auth.ensure_user(user_id)?;

    let account = account_service::account_by_id(state.store.as_ref(), account_id).await?;

    Ok(Json(account))
}

/// Replace an account balance.
///
/// # Request Body
///
/// ```json
/// { "balance": "970.00" }
/// ```
///
/// The target may be the counterparty's account: the client writes both
/// sides of a fund movement on behalf of the authenticated user.
///
/// # Response
///
/// - **Success (200 OK)**: the updated account
/// - **Error (400)**: negative balance
/// - **Error (404)**: no row updated
pub async fn update_balance(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((user_id, account_id)): Path<(i32, i32)>,
    Json(request): Json<UpdateBalanceRequest>,
) -> Result<Json<Account>, AppError> {
    auth.ensure_user(user_id)?;

    let account =
        account_service::replace_balance(state.store.as_ref(), account_id, request.balance).await?;

    Ok(Json(account))
}
