//! Bearer-token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the token from the Authorization header
//! 2. Resolve its hash to a user
//! 3. Inject authentication context into the request
//! 4. Reject unauthorized requests with HTTP 401

use crate::{app::AppState, error::AppError, services::auth_service};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Authentication context attached to authenticated requests.
///
/// Inserted into the request's extension map; handlers extract it with
/// `Extension<AuthContext>`.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i32,
    pub username: String,
}

impl AuthContext {
    /// Routes under `/user/{id}/...` act on behalf of `{id}`, which must be
    /// the authenticated user.
    pub fn ensure_user(&self, user_id: i32) -> Result<(), AppError> {
        if self.user_id != user_id {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}

/// Token authentication middleware function.
///
/// # Headers
///
/// Expected header format:
/// ```text
/// Authorization: Bearer 3f2a...c9
/// ```
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next handler)
/// - `Err(AppError::InvalidToken)` if authentication fails (returns 401)
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::InvalidToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::InvalidToken)?;

    let user = auth_service::authenticate(state.store.as_ref(), token).await?;

    request.extensions_mut().insert(AuthContext {
        user_id: user.user_id,
        username: user.username,
    });

    Ok(next.run(request).await)
}
