mod common;

use axum::http::{Method, StatusCode};
use rust_decimal::Decimal;
use serde_json::json;

use common::{call, register_and_login, test_router};

fn thousand() -> Decimal {
    Decimal::new(100000, 2)
}

#[tokio::test]
async fn health_is_public() {
    let app = test_router(thousand());

    let (status, body) = call(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn user_routes_require_a_valid_token() {
    let app = test_router(thousand());

    let (missing, _) = call(&app, Method::GET, "/user/all/account", None, None).await;
    let (bogus, body) = call(&app, Method::GET, "/user/all/account", Some("nope"), None).await;

    assert_eq!(missing, StatusCode::UNAUTHORIZED);
    assert_eq!(bogus, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "invalid_token");
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_router(thousand());
    register_and_login(&app, "alice").await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({ "username": "alice", "password": "other" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "username_taken");
}

#[tokio::test]
async fn registration_opens_an_account_with_starting_balance() {
    let app = test_router(thousand());
    let (token, user_id) = register_and_login(&app, "alice").await;

    let (status, account) = call(
        &app,
        Method::GET,
        &format!("/user/{user_id}/account"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["account_id"], 2001);
    assert_eq!(account["balance"], "1000.00");

    let (status, accounts) = call(&app, Method::GET, "/user/all/account", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accounts.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn acting_for_another_user_is_forbidden() {
    let app = test_router(thousand());
    let (alice_token, _) = register_and_login(&app, "alice").await;
    let (_, bob_id) = register_and_login(&app, "bob").await;

    let (status, _) = call(
        &app,
        Method::GET,
        &format!("/user/{bob_id}/transfer"),
        Some(&alice_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn send_over_balance_is_rejected_before_any_write() {
    let app = test_router(thousand());
    let (token, user_id) = register_and_login(&app, "alice").await;
    register_and_login(&app, "bob").await;

    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/user/{user_id}/transfer"),
        Some(&token),
        Some(json!({
            "transfer_type": "Send",
            "account_from": 2001,
            "account_to": 2002,
            "amount": "1000.01"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "insufficient_funds");

    let (_, history) = call(&app, Method::GET, "/user/all/transfer", Some(&token), None).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn send_to_own_account_is_rejected() {
    let app = test_router(thousand());
    let (token, user_id) = register_and_login(&app, "alice").await;

    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/user/{user_id}/transfer"),
        Some(&token),
        Some(json!({
            "transfer_type": "Send",
            "account_from": 2001,
            "account_to": 2001,
            "amount": "5.00"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "self_transfer");
}

#[tokio::test]
async fn sub_cent_amounts_are_rejected_before_any_write() {
    let app = test_router(thousand());
    let (alice_token, alice_id) = register_and_login(&app, "alice").await;
    let (bob_token, bob_id) = register_and_login(&app, "bob").await;

    for amount in ["0.005", "0.001"] {
        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/user/{alice_id}/transfer"),
            Some(&alice_token),
            Some(json!({
                "transfer_type": "Send",
                "account_from": 2001,
                "account_to": 2002,
                "amount": amount
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "send of {amount}");
        assert_eq!(body["error"]["code"], "sub_cent_precision");
    }

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/user/{bob_id}/transfer"),
        Some(&bob_token),
        Some(json!({
            "transfer_type": "Request",
            "account_from": 2001,
            "account_to": 2002,
            "amount": "12.345"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/user/{alice_id}/account/2001"),
        Some(&alice_token),
        Some(json!({ "balance": "999.995" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "sub_cent_precision");

    let (_, history) =
        call(&app, Method::GET, "/user/all/transfer", Some(&alice_token), None).await;
    assert!(history.as_array().unwrap().is_empty());

    let (_, account) = call(
        &app,
        Method::GET,
        &format!("/user/{alice_id}/account"),
        Some(&alice_token),
        None,
    )
    .await;
    assert_eq!(account["balance"], "1000.00");
}

#[tokio::test]
async fn balance_beyond_column_range_is_rejected() {
    let app = test_router(thousand());
    let (token, user_id) = register_and_login(&app, "alice").await;

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/user/{user_id}/account/2001"),
        Some(&token),
        Some(json!({ "balance": "100000000000.00" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "balance_out_of_range");
}

#[tokio::test]
async fn request_is_pending_and_can_be_decided_once() {
    let app = test_router(thousand());
    let (alice_token, alice_id) = register_and_login(&app, "alice").await;
    let (bob_token, bob_id) = register_and_login(&app, "bob").await;

    // Bob asks Alice (account 2001) for 30
    let (status, request) = call(
        &app,
        Method::POST,
        &format!("/user/{bob_id}/transfer"),
        Some(&bob_token),
        Some(json!({
            "transfer_type": "Request",
            "account_from": 2001,
            "account_to": 2002,
            "amount": "30.00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(request["transfer_status"], "Pending");
    let transfer_id = request["transfer_id"].as_i64().unwrap();

    let (_, pending) = call(
        &app,
        Method::GET,
        &format!("/user/{alice_id}/transfer/pending"),
        Some(&alice_token),
        None,
    )
    .await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    // The requester cannot approve their own request
    let (status, _) = call(
        &app,
        Method::PUT,
        &format!("/user/{bob_id}/transfer/{transfer_id}"),
        Some(&bob_token),
        Some(json!({ "transfer_status": "Approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, approved) = call(
        &app,
        Method::PUT,
        &format!("/user/{alice_id}/transfer/{transfer_id}"),
        Some(&alice_token),
        Some(json!({ "transfer_status": "Approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["transfer_status"], "Approved");

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/user/{alice_id}/transfer/{transfer_id}"),
        Some(&alice_token),
        Some(json!({ "transfer_status": "Rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "invalid_transition");

    let (_, pending) = call(
        &app,
        Method::GET,
        &format!("/user/{alice_id}/transfer/pending"),
        Some(&alice_token),
        None,
    )
    .await;
    assert!(pending.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn balance_replacement_rules() {
    let app = test_router(thousand());
    let (token, user_id) = register_and_login(&app, "alice").await;

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/user/{user_id}/account/2001"),
        Some(&token),
        Some(json!({ "balance": "-1.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "negative_balance");

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/user/{user_id}/account/2999"),
        Some(&token),
        Some(json!({ "balance": "10.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "update_failed");

    let (status, account) = call(
        &app,
        Method::PUT,
        &format!("/user/{user_id}/account/2001"),
        Some(&token),
        Some(json!({ "balance": "970.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["balance"], "970.00");
}

#[tokio::test]
async fn transfer_of_other_users_is_not_found() {
    let app = test_router(thousand());
    let (alice_token, alice_id) = register_and_login(&app, "alice").await;
    register_and_login(&app, "bob").await;
    let (carol_token, carol_id) = register_and_login(&app, "carol").await;

    let (_, send) = call(
        &app,
        Method::POST,
        &format!("/user/{alice_id}/transfer"),
        Some(&alice_token),
        Some(json!({
            "transfer_type": "Send",
            "account_from": 2001,
            "account_to": 2002,
            "amount": "10"
        })),
    )
    .await;
    let transfer_id = send["transfer_id"].as_i64().unwrap();

    let (status, _) = call(
        &app,
        Method::GET,
        &format!("/user/{carol_id}/transfer/{transfer_id}"),
        Some(&carol_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, transfer) = call(
        &app,
        Method::GET,
        &format!("/user/{alice_id}/transfer/{transfer_id}"),
        Some(&alice_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(transfer["transfer_type"], "Send");
    assert_eq!(transfer["transfer_status"], "Approved");
}

#[tokio::test]
async fn user_lookups() {
    let app = test_router(thousand());
    let (token, _) = register_and_login(&app, "alice").await;
    register_and_login(&app, "bob").await;

    let (_, users) = call(&app, Method::GET, "/user/allusers", Some(&token), None).await;
    assert_eq!(users.as_array().unwrap().len(), 2);

    let (status, bob) = call(&app, Method::GET, "/user/userId/1002", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bob["username"], "bob");

    let (status, alice) =
        call(&app, Method::GET, "/user/username/alice", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(alice["user_id"], 1001);

    let (status, body) =
        call(&app, Method::GET, "/user/username/mallory", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "user_not_found");
}
