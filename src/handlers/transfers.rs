//! Transfer HTTP handlers.
//!
//! This module implements transfer-related API endpoints:
//! - GET /user/all/transfer - Entire transfer history
//! - GET /user/{id}/transfer - Transfers involving the user
//! - GET /user/{id}/transfer/pending - Requests awaiting the user's approval
//! - GET /user/{id}/transfer/{transfer_id} - One transfer
//! - POST /user/{id}/transfer - Record a send or request
//! - PUT /user/{id}/transfer/{transfer_id} - Approve or reject a request

use crate::{
    app::AppState,
    error::AppError,
    middleware::auth::AuthContext,
    models::transfer::{NewTransfer, Transfer, UpdateTransferStatusRequest},
    services::transfer_service,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

pub async fn list_all_transfers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Transfer>>, AppError> {
    let transfers = transfer_service::all_transfers(state.store.as_ref()).await?;

    Ok(Json(transfers))
}

/// Transfer history of the user, newest first (may be empty).
pub async fn list_transfers(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<Transfer>>, AppError> {
    auth.ensure_user(user_id)?;

    let transfers = transfer_service::history_for_user(state.store.as_ref(), user_id).await?;

    Ok(Json(transfers))
}

/// Pending requests where the user is the fund-holder.
pub async fn list_pending(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<Transfer>>, AppError> {
    auth.ensure_user(user_id)?;

    let transfers = transfer_service::pending_for_user(state.store.as_ref(), user_id).await?;

    Ok(Json(transfers))
}

/// Get one transfer.
///
/// # Security
///
/// Returns 404 if the transfer does not involve the user's account.
pub async fn get_transfer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((user_id, transfer_id)): Path<(i32, i32)>,
) -> Result<Json<Transfer>, AppError> {
    auth.ensure_user(user_id)?;

    let transfer =
        transfer_service::transfer_for_user(state.store.as_ref(), user_id, transfer_id).await?;

    Ok(Json(transfer))
}

/// Record a send or a request.
///
/// # Request Body
///
/// ```json
/// {
///   "transfer_type": "Send",
///   "account_from": 2001,
///   "account_to": 2002,
///   "amount": "25.00"
/// }
/// ```
///
/// # Response (201)
///
/// ```json
/// {
///   "transfer_id": 3001,
///   "transfer_type": "Send",
///   "transfer_status": "Approved",
///   "account_from": 2001,
///   "account_to": 2002,
///   "amount": "25.00"
/// }
/// ```
///
/// Recording a send does not move money; the caller replaces both balances
/// afterwards.
pub async fn create_transfer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<i32>,
    Json(request): Json<NewTransfer>,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_user(user_id)?;

    let transfer =
        transfer_service::create_transfer(state.store.as_ref(), user_id, request).await?;

    Ok((StatusCode::CREATED, Json(transfer)))
}

/// Approve or reject a pending request.
///
/// # Request Body
///
/// ```json
/// { "transfer_status": "Approved" }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: the decided transfer
/// - **Error (403)**: the user is not the fund-holder
/// - **Error (404)**: unknown transfer, or no row updated
/// - **Error (409)**: already decided, a send, or not a decision
pub async fn update_transfer_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((user_id, transfer_id)): Path<(i32, i32)>,
    Json(request): Json<UpdateTransferStatusRequest>,
) -> Result<Json<Transfer>, AppError> {
    auth.ensure_user(user_id)?;

    let transfer = transfer_service::decide_transfer(
        state.store.as_ref(),
        user_id,
        transfer_id,
        request.transfer_status,
    )
    .await?;

    Ok(Json(transfer))
}
