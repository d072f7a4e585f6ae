//! User lookups.

use crate::{error::AppError, models::user::User, store::Store};

pub async fn list_users(store: &dyn Store) -> Result<Vec<User>, AppError> {
    store.list_users().await
}

pub async fn user_by_id(store: &dyn Store, user_id: i32) -> Result<User, AppError> {
    store.user_by_id(user_id).await?.ok_or(AppError::UserNotFound)
}

pub async fn user_by_username(store: &dyn Store, username: &str) -> Result<User, AppError> {
    store
        .user_by_username(username)
        .await?
        .ok_or(AppError::UserNotFound)
}
