//! User lookup HTTP handlers.

use crate::{app::AppState, error::AppError, models::user::User, services::user_service};
use axum::{
    Json,
    extract::{Path, State},
};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = user_service::list_users(state.store.as_ref()).await?;

    Ok(Json(users))
}

pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<User>, AppError> {
    let user = user_service::user_by_id(state.store.as_ref(), user_id).await?;

    Ok(Json(user))
}

pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = user_service::user_by_username(state.store.as_ref(), &username).await?;

    Ok(Json(user))
}
