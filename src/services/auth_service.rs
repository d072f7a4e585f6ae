//! Registration, login and bearer-token resolution.
//!
//! # Security
//!
//! - Passwords are hashed with Argon2 (PHC string with embedded salt)
//! - Tokens are 32 random bytes, hex-encoded, handed out once at login
//! - Only the SHA-256 hash of a token is stored and compared

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::{
    error::AppError,
    models::user::{CredentialsRequest, LoginResponse, User},
    store::Store,
};

/// Register a user and open their account with `starting_balance`.
///
/// # Errors
///
/// - `InvalidRequest`: blank username or password
/// - `UsernameTaken`: the username already exists
pub async fn register(
    store: &dyn Store,
    starting_balance: Decimal,
    request: CredentialsRequest,
) -> Result<User, AppError> {
    let username = request.username.trim();
    if username.is_empty() || request.password.is_empty() {
        return Err(AppError::InvalidRequest(
            "Username and password are required".to_string(),
        ));
    }

    let password_hash = hash_password(&request.password)?;
    let user = store
        .create_user(username, &password_hash, starting_balance)
        .await?;

    tracing::info!(user_id = user.user_id, username = %user.username, "User registered");

    Ok(user)
}

/// Verify credentials and issue a fresh bearer token.
///
/// Unknown usernames and wrong passwords fail the same way.
pub async fn login(
    store: &dyn Store,
    request: CredentialsRequest,
) -> Result<LoginResponse, AppError> {
    let credentials = store
        .find_credentials(request.username.trim())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    verify_password(&request.password, &credentials.password_hash)?;

    let token = generate_token();
    store.store_token(&hash_token(&token), credentials.user_id).await?;

    tracing::info!(user_id = credentials.user_id, "User logged in");

    Ok(LoginResponse {
        token,
        user: credentials.into(),
    })
}

/// Resolve a bearer token to its user.
pub async fn authenticate(store: &dyn Store, token: &str) -> Result<User, AppError> {
    store
        .user_for_token(&hash_token(token))
        .await?
        .ok_or(AppError::InvalidToken)
}

/// SHA-256 of the token, hex-encoded (64 characters).
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// 64 hex characters (32 random bytes)
fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::CreationFailed(format!("Failed to encode salt: {e}")))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::CreationFailed(format!("Failed to hash password: {e}")))
}

fn verify_password(password: &str, password_hash: &str) -> Result<(), AppError> {
    let parsed = PasswordHash::new(password_hash).map_err(|_| AppError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AppError::InvalidCredentials)
}
