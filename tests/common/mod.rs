#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tenmo::{
    app::{AppState, router},
    client::{ApiClient, Teller},
    models::user::CredentialsRequest,
    store::MemoryStore,
};
use tower::ServiceExt;

pub fn test_router(starting_balance: Decimal) -> Router {
    router(AppState::new(Arc::new(MemoryStore::new()), starting_balance))
}

/// Send one request through the router and decode the JSON body
/// (`Value::Null` when empty or not JSON).
pub async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Register and log in; returns the token and user id.
pub async fn register_and_login(app: &Router, username: &str) -> (String, i64) {
    let credentials = json!({ "username": username, "password": "secret" });

    let (status, _) = call(app, Method::POST, "/register", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(app, Method::POST, "/login", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::OK);

    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["user_id"].as_i64().unwrap(),
    )
}

/// Serve a fresh in-memory router on an ephemeral port; returns its base URL.
pub async fn spawn_server(starting_balance: Decimal) -> String {
    let app = test_router(starting_balance);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/")
}

pub fn credentials(username: &str) -> CredentialsRequest {
    CredentialsRequest {
        username: username.to_string(),
        password: "secret".to_string(),
    }
}

/// Register a user over HTTP and return a teller logged in as them.
pub async fn teller_for(base_url: &str, username: &str) -> Teller {
    let api = ApiClient::new(base_url).unwrap();
    api.register(&credentials(username)).await.unwrap();
    let session = api.login(&credentials(username)).await.unwrap();
    Teller::new(api, session)
}
