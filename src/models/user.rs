//! User model and authentication request/response types.
//!
//! Users authenticate with a username and password and receive an opaque
//! bearer token. Passwords are stored as Argon2 hashes and tokens as
//! SHA-256 hashes; neither ever leaves the store in plain form.

use serde::{Deserialize, Serialize};

/// Public view of a user record.
///
/// # Database Table
///
/// Maps to the `tenmo_user` table (without the `password_hash` column).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for this user (seeded from 1001)
    pub user_id: i32,

    pub username: String,
}

/// User record including the stored password hash.
///
/// Only used while verifying a login; never serialized.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub user_id: i32,
    pub username: String,

    /// Argon2 PHC string
    pub password_hash: String,
}

impl From<UserCredentials> for User {
    fn from(credentials: UserCredentials) -> Self {
        Self {
            user_id: credentials.user_id,
            username: credentials.username,
        }
    }
}

/// Request body for `POST /register` and `POST /login`.
///
/// # JSON Example
///
/// ```json
/// {
///   "username": "alice",
///   "password": "correct horse"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Response body for a successful login.
///
/// The `token` is shown only here; the server keeps its hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}
