//! Shared application state and the HTTP router.

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use rust_decimal::Decimal;
use tower_http::trace::TraceLayer;

use crate::{handlers, middleware, store::Store};

/// State handed to every handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,

    /// Balance given to accounts opened at registration
    pub starting_balance: Decimal,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, starting_balance: Decimal) -> Self {
        Self {
            store,
            starting_balance,
        }
    }
}

/// Build the full router: public auth/health routes plus the
/// bearer-authenticated `/user` surface.
pub fn router(state: AppState) -> Router {
    let authenticated_routes = Router::new()
        // Account routes
        .route("/user/all/account", get(handlers::accounts::list_accounts))
        .route(
            "/user/{id}/account",
            get(handlers::accounts::get_account_for_user),
        )
        .route(
            "/user/{id}/account/{account_id}",
            get(handlers::accounts::get_account).put(handlers::accounts::update_balance),
        )
        // Transfer routes
        .route(
            "/user/all/transfer",
            get(handlers::transfers::list_all_transfers),
        )
        .route(
            "/user/{id}/transfer",
            get(handlers::transfers::list_transfers).post(handlers::transfers::create_transfer),
        )
        .route(
            "/user/{id}/transfer/pending",
            get(handlers::transfers::list_pending),
        )
        .route(
            "/user/{id}/transfer/{transfer_id}",
            get(handlers::transfers::get_transfer).put(handlers::transfers::update_transfer_status),
        )
        // User routes
        .route("/user/allusers", get(handlers::users::list_users))
        .route("/user/userId/{id}", get(handlers::users::get_user_by_id))
        .route(
            "/user/username/{username}",
            get(handlers::users::get_user_by_username),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .merge(authenticated_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
