mod common;

use std::io::Cursor;

use rust_decimal::Decimal;
use tenmo::{
    client::{ApiClient, App, ClientError, Console},
    ledger::{LedgerError, MAX_BALANCE},
    models::transfer::{TransferStatus, TransferType},
};

use common::{credentials, spawn_server, teller_for};

fn hundred() -> Decimal {
    Decimal::new(10000, 2)
}

#[tokio::test]
async fn approving_a_request_moves_exactly_the_amount() {
    let base_url = spawn_server(hundred()).await;
    let holder = teller_for(&base_url, "alice").await;
    let requester = teller_for(&base_url, "bob").await;

    // Bob requests 30 from Alice's account
    let request = requester.request_bucks(2001, Decimal::from(30)).await.unwrap();
    assert_eq!(request.transfer_type, TransferType::Request);
    assert_eq!(request.transfer_status, TransferStatus::Pending);
    assert_eq!(holder.balance().await.unwrap(), hundred());

    let approved = holder.approve(request.transfer_id).await.unwrap();

    assert_eq!(approved.transfer_status, TransferStatus::Approved);
    assert_eq!(holder.balance().await.unwrap(), Decimal::from(70));
    assert_eq!(requester.balance().await.unwrap(), Decimal::from(130));
}

#[tokio::test]
async fn approval_cannot_be_repeated() {
    let base_url = spawn_server(hundred()).await;
    let holder = teller_for(&base_url, "alice").await;
    let requester = teller_for(&base_url, "bob").await;
    let request = requester.request_bucks(2001, Decimal::from(30)).await.unwrap();
    holder.approve(request.transfer_id).await.unwrap();

    let err = holder.approve(request.transfer_id).await.unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 409, .. }));
    assert_eq!(holder.balance().await.unwrap(), Decimal::from(70));
    assert_eq!(requester.balance().await.unwrap(), Decimal::from(130));
}

#[tokio::test]
async fn rejecting_a_request_leaves_balances_unchanged() {
    let base_url = spawn_server(hundred()).await;
    let holder = teller_for(&base_url, "alice").await;
    let requester = teller_for(&base_url, "bob").await;
    let request = requester.request_bucks(2001, Decimal::from(30)).await.unwrap();

    let rejected = holder.reject(request.transfer_id).await.unwrap();

    assert_eq!(rejected.transfer_status, TransferStatus::Rejected);
    assert_eq!(holder.balance().await.unwrap(), hundred());
    assert_eq!(requester.balance().await.unwrap(), hundred());
    assert!(holder.pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn approval_beyond_balance_is_refused_and_stays_pending() {
    let base_url = spawn_server(hundred()).await;
    let holder = teller_for(&base_url, "alice").await;
    let requester = teller_for(&base_url, "bob").await;
    let request = requester.request_bucks(2001, Decimal::from(150)).await.unwrap();

    let err = holder.approve(request.transfer_id).await.unwrap_err();

    assert!(matches!(err, ClientError::Ledger(LedgerError::InsufficientFunds)));
    assert_eq!(
        holder.transfer(request.transfer_id).await.unwrap().transfer_status,
        TransferStatus::Pending
    );
    assert_eq!(holder.balance().await.unwrap(), hundred());
}

#[tokio::test]
async fn requester_cannot_approve_their_own_request() {
    let base_url = spawn_server(hundred()).await;
    let _holder = teller_for(&base_url, "alice").await;
    let requester = teller_for(&base_url, "bob").await;
    let request = requester.request_bucks(2001, Decimal::from(30)).await.unwrap();

    let err = requester.approve(request.transfer_id).await.unwrap_err();

    assert!(matches!(err, ClientError::NotFundHolder(id) if id == request.transfer_id));
}

#[tokio::test]
async fn send_moves_funds_immediately() {
    let base_url = spawn_server(hundred()).await;
    let alice = teller_for(&base_url, "alice").await;
    let bob = teller_for(&base_url, "bob").await;

    let sent = alice.send_bucks(2002, Decimal::new(2550, 2)).await.unwrap();

    assert_eq!(sent.transfer_status, TransferStatus::Approved);
    assert_eq!(alice.balance().await.unwrap(), Decimal::new(7450, 2));
    assert_eq!(bob.balance().await.unwrap(), Decimal::new(12550, 2));
    assert_eq!(bob.history().await.unwrap(), vec![sent]);
}

#[tokio::test]
async fn invalid_sends_write_nothing() {
    let base_url = spawn_server(hundred()).await;
    let alice = teller_for(&base_url, "alice").await;
    let bob = teller_for(&base_url, "bob").await;

    let over = alice.send_bucks(2002, Decimal::new(10001, 2)).await.unwrap_err();
    let own = alice.send_bucks(2001, Decimal::from(1)).await.unwrap_err();
    let zero = alice.send_bucks(2002, Decimal::ZERO).await.unwrap_err();
    let sub_cent = alice.send_bucks(2002, Decimal::new(5, 3)).await.unwrap_err();

    assert!(matches!(over, ClientError::Ledger(LedgerError::InsufficientFunds)));
    assert!(matches!(own, ClientError::Ledger(LedgerError::SelfTransfer)));
    assert!(matches!(zero, ClientError::Ledger(LedgerError::NonPositiveAmount)));
    assert!(matches!(sub_cent, ClientError::Ledger(LedgerError::SubCentPrecision)));
    assert_eq!(alice.balance().await.unwrap(), hundred());
    assert!(alice.history().await.unwrap().is_empty());
    assert_eq!(bob.balance().await.unwrap(), hundred());
}

#[tokio::test]
async fn credit_past_the_balance_ceiling_writes_nothing() {
    let base_url = spawn_server(hundred()).await;
    let alice = teller_for(&base_url, "alice").await;
    let bob = teller_for(&base_url, "bob").await;
    let request = bob.request_bucks(2001, Decimal::ONE).await.unwrap();

    let api = ApiClient::new(&base_url).unwrap();
    let session = api.login(&credentials("bob")).await.unwrap();
    api.update_balance(&session, 2002, MAX_BALANCE).await.unwrap();

    let send = alice.send_bucks(2002, Decimal::ONE).await.unwrap_err();
    let approval = alice.approve(request.transfer_id).await.unwrap_err();

    assert!(matches!(send, ClientError::Ledger(LedgerError::BalanceOutOfRange)));
    assert!(matches!(approval, ClientError::Ledger(LedgerError::BalanceOutOfRange)));
    assert_eq!(alice.balance().await.unwrap(), hundred());
    assert_eq!(bob.balance().await.unwrap(), MAX_BALANCE);
    assert_eq!(
        alice.transfer(request.transfer_id).await.unwrap().transfer_status,
        TransferStatus::Pending
    );
    assert_eq!(alice.history().await.unwrap(), vec![request]);
}

#[tokio::test]
async fn users_are_found_by_id_and_by_awkward_usernames() {
    let base_url = spawn_server(hundred()).await;
    teller_for(&base_url, "mary ann").await;
    teller_for(&base_url, "r&d/ops").await;

    let api = ApiClient::new(&base_url).unwrap();
    let session = api.login(&credentials("mary ann")).await.unwrap();

    let spaced = api.user_by_username(&session, "mary ann").await.unwrap();
    let slashed = api.user_by_username(&session, "r&d/ops").await.unwrap();
    let by_id = api.user_by_id(&session, slashed.user_id).await.unwrap();
    let missing = api.user_by_username(&session, "mary").await.unwrap_err();

    assert_eq!(spaced.user_id, 1001);
    assert_eq!(slashed.user_id, 1002);
    assert_eq!(by_id.username, "r&d/ops");
    assert!(matches!(missing, ClientError::Api { status: 404, .. }));
}

#[tokio::test]
async fn directory_lists_every_account_with_its_owner() {
    let base_url = spawn_server(hundred()).await;
    let alice = teller_for(&base_url, "alice").await;
    teller_for(&base_url, "bob").await;

    let directory = alice.directory().await.unwrap();

    let names: Vec<(i32, &str)> = directory
        .iter()
        .map(|entry| (entry.account_id, entry.username.as_str()))
        .collect();
    assert_eq!(names, vec![(2001, "alice"), (2002, "bob")]);
    assert_eq!(alice.user().username, "alice");
}

#[tokio::test]
async fn scripted_session_registers_logs_in_and_shows_balance() {
    let base_url = spawn_server(hundred()).await;
    let api = ApiClient::new(&base_url).unwrap();
    // register, login, view balance, continue, exit
    let input = "1\nalice\nsecret\n2\nalice\nsecret\n1\n\n0\n";
    let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());

    let console = App::new(api, console).run().await.unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();

    assert!(output.contains("Welcome to TEnmo!"));
    assert!(output.contains("Registration successful. You can now login."));
    assert!(output.contains("Your current account balance is: $100.00"));
}

#[tokio::test]
async fn scripted_session_reports_rule_violations_and_keeps_going() {
    let base_url = spawn_server(hundred()).await;
    teller_for(&base_url, "bob").await;
    let alice = teller_for(&base_url, "alice").await;
    let api = ApiClient::new(&base_url).unwrap();
    // login as alice, try to send 500 to bob, continue, exit
    let input = "2\nalice\nsecret\n4\n2001\n500\n\n0\n";
    let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());

    let console = App::new(api, console).run().await.unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();

    assert!(output.contains("Error: Not enough TE Bucks in account"));
    assert_eq!(alice.balance().await.unwrap(), hundred());
}
