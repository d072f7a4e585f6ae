//! Registration and login handlers (public, no token required).

use crate::{
    app::AppState,
    error::AppError,
    models::user::{CredentialsRequest, LoginResponse},
    services::auth_service,
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// Register a new user.
///
/// # Response
///
/// - **Success (201 Created)**: the new user
/// - **Error (400)**: blank username or password
/// - **Error (409)**: username already taken
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user =
        auth_service::register(state.store.as_ref(), state.starting_balance, request).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in and receive a bearer token.
///
/// # Response (200)
///
/// ```json
/// {
///   "token": "3f2a...c9",
///   "user": { "user_id": 1001, "username": "alice" }
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = auth_service::login(state.store.as_ref(), request).await?;

    Ok(Json(response))
}
