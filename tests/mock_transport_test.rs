//! Client normalization against scripted replies.

mod common;

use common::{assert_error_response, assert_resource_response};
use docdb_client::client::ResourceClient;
use docdb_client::config::ClientConfig;
use docdb_client::error::ErrorKind;
use docdb_client::response::Operation;
use docdb_client::transport::mock::MockTransport;
use docdb_client::transport::{RawResponse, TransportError};
use serde_json::json;

fn client(mock: &MockTransport) -> ResourceClient {
    ResourceClient::new(mock.clone(), ClientConfig::default())
}

fn collection_body(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "_rid": "Y2xs",
        "_self": "dbs/ZGI=/colls/Y2xs/",
        "altLink": format!("dbs/D1/colls/{id}"),
        "_etag": "\"0001\"",
        "_ts": 1_700_000_000,
        "_docs": "docs/",
    })
}

#[tokio::test]
async fn test_create_collection_sends_feed_request() {
    let mock = MockTransport::new();
    mock.expect_send()
        .for_operation(Operation::Create)
        .for_link("dbs/D1/colls")
        .return_json(201, collection_body("C1"));

    let response = client(&mock).create_collection("C1", "D1").await;
    assert_resource_response(&response);
    assert_eq!(response.status(), Some(201));
    assert_eq!(response.request().operation, Operation::Create);
    mock.verify();
}

#[tokio::test]
async fn test_transport_errors_become_error_envelopes() {
    for failure in [
        TransportError::Closed,
        TransportError::Dropped,
        TransportError::Connection("reset by peer".into()),
    ] {
        let mock = MockTransport::new();
        mock.expect_send().return_err(failure.clone());

        let response = client(&mock).get_collections("D1").await;
        assert_error_response(&response, ErrorKind::Transport);
        assert!(!response.is_populated());
        assert_eq!(response.error().unwrap().message, failure.to_string());
        assert!(response.json_data().is_empty());
        assert_eq!(response.request().link, "dbs/D1/colls");
        mock.verify();
    }
}

#[tokio::test]
async fn test_undecodable_success_body_is_decode_error() {
    let mock = MockTransport::new();
    mock.expect_send()
        .return_raw(RawResponse::new(200, b"<html>gateway</html>".to_vec()));

    let response = client(&mock).get_collection("C1", "D1").await;
    assert_error_response(&response, ErrorKind::Decode);
    assert_eq!(response.status(), Some(200));
    assert_eq!(response.json_str(), Some("<html>gateway</html>"));
}

#[tokio::test]
async fn test_list_with_incomplete_item_is_decode_error() {
    let mock = MockTransport::new();
    mock.expect_send().return_json(
        200,
        json!({
            "_rid": "ZGI=",
            "_count": 2,
            "items": [collection_body("C1"), { "id": "C2" }],
        }),
    );

    let response = client(&mock).get_collections("D1").await;
    assert_error_response(&response, ErrorKind::Decode);
    assert!(response.items().is_empty());
}

#[tokio::test]
async fn test_error_without_json_body_keeps_status() {
    let mock = MockTransport::new();
    mock.expect_send()
        .return_raw(RawResponse::new(502, b"bad gateway".to_vec()));

    let response = client(&mock).delete_collection("C1", "D1").await;
    assert_error_response(&response, ErrorKind::Service);
    let error = response.error().unwrap();
    assert_eq!(error.status, Some(502));
    assert!(error.message.contains("502"));
}

#[tokio::test]
async fn test_invalid_addresses_are_never_sent() {
    let mock = MockTransport::new();
    let client = client(&mock);

    assert_error_response(&client.create_user("U1", "").await, ErrorKind::InvalidAddress);
    assert_error_response(&client.get_user("a/b", "D1").await, ErrorKind::InvalidAddress);
    assert_error_response(
        &client.get_documents("C1", " ").await,
        ErrorKind::InvalidAddress,
    );
    assert_error_response(
        &client.replace_user("U1", "", "D1").await,
        ErrorKind::InvalidAddress,
    );
    assert_error_response(
        &client.delete_document("?", "C1", "D1").await,
        ErrorKind::InvalidAddress,
    );

    assert!(mock.received().is_empty());
    mock.verify();
}
