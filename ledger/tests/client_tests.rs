//! Integration tests for the ledger query client against a mocked remote.
//!
//! Covers the "not found means zero" allow-list, the resource fallback
//! path, snapshot replacement semantics, and verbatim transfer errors.

use httpmock::prelude::*;
use serde_json::json;

use pact_ledger::{LedgerConfig, LedgerError, LedgerQueryClient};
use pact_types::{LedgerAddress, TokenAmount};

fn client_for(server: &MockServer) -> LedgerQueryClient {
    let config = LedgerConfig {
        rpc_url: server.base_url(),
        transfer_url: format!("{}/api/transfer", server.base_url()),
        ..LedgerConfig::default()
    };
    LedgerQueryClient::new(&config).expect("client")
}

fn addr(s: &str) -> LedgerAddress {
    LedgerAddress::parse(s).expect("address")
}

// ---------------------------------------------------------------------------
// Native balance
// ---------------------------------------------------------------------------

#[tokio::test]
async fn native_balance_reads_view_result() {
    let server = MockServer::start_async().await;
    let _view = server
        .mock_async(|when, then| {
            when.method(POST).path("/view").body_contains("coin::balance");
            then.status(200).json_body(json!(["12345678900"]));
        })
        .await;

    let client = client_for(&server);
    let balance = client.native_balance(&addr("0x01")).await.unwrap();
    assert_eq!(balance.raw(), 12_345_678_900);
    assert_eq!(balance.as_decimal(), 123.456789);
}

#[tokio::test]
async fn native_balance_not_found_is_zero() {
    let server = MockServer::start_async().await;
    let _view = server
        .mock_async(|when, then| {
            when.method(POST).path("/view");
            then.status(404).json_body(json!({"error_code": "resource_not_found"}));
        })
        .await;

    let client = client_for(&server);
    let balance = client.native_balance(&addr("0x01")).await.unwrap();
    assert_eq!(balance, TokenAmount::ZERO);
}

#[tokio::test]
async fn native_balance_falls_back_to_resource_path() {
    let server = MockServer::start_async().await;
    let _view = server
        .mock_async(|when, then| {
            when.method(POST).path("/view");
            then.status(500);
        })
        .await;
    let _resource = server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/accounts/0x01/resource/");
            then.status(200)
                .json_body(json!({"data": {"coin": {"value": "777"}}}));
        })
        .await;

    let client = client_for(&server);
    let balance = client.native_balance(&addr("0x01")).await.unwrap();
    assert_eq!(balance.raw(), 777);
}

#[tokio::test]
async fn native_balance_fallback_not_found_is_zero() {
    let server = MockServer::start_async().await;
    let _view = server
        .mock_async(|when, then| {
            when.method(POST).path("/view");
            then.status(500);
        })
        .await;
    let _resource = server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/resource/");
            then.status(404);
        })
        .await;

    let client = client_for(&server);
    let balance = client.native_balance(&addr("0x01")).await.unwrap();
    assert_eq!(balance, TokenAmount::ZERO);
}

#[tokio::test]
async fn native_balance_surfaces_server_errors() {
    let server = MockServer::start_async().await;
    let _view = server
        .mock_async(|when, then| {
            when.method(POST).path("/view");
            then.status(500);
        })
        .await;
    let _resource = server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/resource/");
            then.status(503);
        })
        .await;

    let client = client_for(&server);
    let err = client.native_balance(&addr("0x01")).await.unwrap_err();
    assert!(matches!(err, LedgerError::Http(503)));
}

// ---------------------------------------------------------------------------
// Token balance
// ---------------------------------------------------------------------------

#[tokio::test]
async fn token_balance_queries_derived_metadata_address() {
    let server = MockServer::start_async().await;
    let client = client_for(&server);
    let metadata = client.token_metadata_address().as_str().to_string();

    let view = server
        .mock_async(move |when, then| {
            when.method(POST)
                .path("/view")
                .body_contains("primary_fungible_store")
                .body_contains(&metadata);
            then.status(200).json_body(json!(["500000000"]));
        })
        .await;

    let balance = client.token_balance(&addr("0x01")).await.unwrap();
    assert_eq!(balance.as_decimal(), 5.0);
    view.assert_async().await;
}

#[tokio::test]
async fn token_balance_not_found_and_bad_request_are_zero() {
    for status in [404u16, 400] {
        let server = MockServer::start_async().await;
        let _view = server
            .mock_async(move |when, then| {
                when.method(POST).path("/view");
                then.status(status);
            })
            .await;

        let client = client_for(&server);
        let balance = client.token_balance(&addr("0x01")).await.unwrap();
        assert_eq!(balance, TokenAmount::ZERO, "HTTP {status} should read as zero");
    }
}

#[tokio::test]
async fn token_balance_surfaces_other_errors() {
    let server = MockServer::start_async().await;
    let _view = server
        .mock_async(|when, then| {
            when.method(POST).path("/view");
            then.status(429);
        })
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.token_balance(&addr("0x01")).await,
        Err(LedgerError::Http(429))
    ));
}

// ---------------------------------------------------------------------------
// Snapshot refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_replaces_snapshot_only_when_both_reads_succeed() {
    let server = MockServer::start_async().await;
    let mut view = server
        .mock_async(|when, then| {
            when.method(POST).path("/view");
            then.status(200).json_body(json!(["100000000"]));
        })
        .await;

    let client = client_for(&server);
    assert!(client.snapshot().is_none());

    let first = client.refresh_balances(&addr("0x01")).await.unwrap();
    assert_eq!(first.native_balance.as_decimal(), 1.0);
    assert_eq!(client.snapshot().unwrap(), first);
    assert!(client.last_error().is_none());

    // Remote starts failing: the old snapshot must survive untouched.
    view.delete_async().await;
    let _broken = server
        .mock_async(|when, then| {
            when.method(POST).path("/view");
            then.status(500);
        })
        .await;
    let _resource = server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/resource/");
            then.status(500);
        })
        .await;

    let err = client.refresh_balances(&addr("0x01")).await;
    assert!(err.is_err());
    assert_eq!(client.snapshot().unwrap(), first, "stale snapshot preserved");
    assert!(client.last_error().is_some(), "soft error recorded");
}

// ---------------------------------------------------------------------------
// Transfers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transfer_success_returns_receipt() {
    let server = MockServer::start_async().await;
    let transfer = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/transfer")
                .json_body(json!({"to_address": "0x02", "amount": 5.0}));
            then.status(200)
                .json_body(json!({"tx_hash": "0x99", "status": "submitted"}));
        })
        .await;

    let client = client_for(&server);
    let receipt = client
        .request_transfer(&addr("0x02"), TokenAmount::from_decimal(5.0).unwrap())
        .await
        .unwrap();
    assert_eq!(receipt.tx_hash.as_deref(), Some("0x99"));
    assert_eq!(receipt.status.as_deref(), Some("submitted"));
    transfer.assert_async().await;
}

#[tokio::test]
async fn transfer_failure_carries_remote_detail_verbatim() {
    let server = MockServer::start_async().await;
    let _transfer = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/transfer");
            then.status(400).json_body(json!({"detail": "insufficient balance"}));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .request_transfer(&addr("0x02"), TokenAmount::from_decimal(5.0).unwrap())
        .await
        .unwrap_err();
    match err {
        LedgerError::Transfer(detail) => assert_eq!(detail, "insufficient balance"),
        other => panic!("expected transfer error, got {other}"),
    }
}

#[tokio::test]
async fn transfer_failure_falls_back_to_message_field() {
    let server = MockServer::start_async().await;
    let _transfer = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/transfer");
            then.status(502).json_body(json!({"message": "upstream unavailable"}));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .request_transfer(&addr("0x02"), TokenAmount::from_decimal(1.0).unwrap())
        .await
        .unwrap_err();
    match err {
        LedgerError::Transfer(detail) => assert_eq!(detail, "upstream unavailable"),
        other => panic!("expected transfer error, got {other}"),
    }
}

#[tokio::test]
async fn transfer_failure_without_body_reports_status() {
    let server = MockServer::start_async().await;
    let _transfer = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/transfer");
            then.status(500);
        })
        .await;

    let client = client_for(&server);
    let err = client
        .request_transfer(&addr("0x02"), TokenAmount::from_decimal(1.0).unwrap())
        .await
        .unwrap_err();
    match err {
        LedgerError::Transfer(detail) => assert!(detail.contains("500")),
        other => panic!("expected transfer error, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn config_loads_from_toml_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("ledger.toml");
    std::fs::write(
        &path,
        r#"
rpc_url = "https://ledger.example/v1"
token_creator = "0xcafe"
token_seed = "SPEND"
"#,
    )
    .expect("write config");

    let config = LedgerConfig::from_toml_file(&path).unwrap();
    assert_eq!(config.rpc_url, "https://ledger.example/v1");
    assert_eq!(config.token_creator.as_str(), "0xcafe");
    assert_eq!(config.token_seed, "SPEND");
    assert_eq!(config.request_timeout_secs, 30);
}
