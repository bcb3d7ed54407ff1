// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the Square catalog client against a mock server.

#![allow(clippy::unwrap_used)]

use super::*;
use catmirror_core::fetch_all;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(base_url: &str) -> SquareConfig {
    SquareConfig {
        base_url: base_url.to_string(),
        api_version: DEFAULT_API_VERSION.to_string(),
        timeout_secs: 5,
    }
}

fn catalog_item(id: &str, name: &str) -> Value {
    json!({
        "type": "ITEM",
        "id": id,
        "version": 1,
        "item_data": { "name": name }
    })
}

fn list_page(base_url: String, cursor: Option<&'static str>) -> std::result::Result<Page, FetchError> {
    let client = SquareClient::new(&config(&base_url), "test-token".to_string()).unwrap();
    client.list("ITEM", cursor)
}

#[tokio::test]
async fn list_sends_auth_and_version_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/catalog/list"))
        .and(query_param("types", "ITEM"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Square-Version", DEFAULT_API_VERSION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [catalog_item("A", "Widget")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let page = tokio::task::spawn_blocking(move || list_page(base_url, None))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0]["id"], "A");
    assert_eq!(page.cursor, None);
}

#[tokio::test]
async fn list_passes_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/catalog/list"))
        .and(query_param("cursor", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [],
            "cursor": "def"
        })))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let page = tokio::task::spawn_blocking(move || list_page(base_url, Some("abc")))
        .await
        .unwrap()
        .unwrap();

    assert!(page.records.is_empty());
    assert_eq!(page.next_cursor(), Some("def"));
}

#[tokio::test]
async fn missing_or_null_objects_is_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/catalog/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "objects": null })))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let page = tokio::task::spawn_blocking(move || list_page(base_url, None))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(page, Page::default());
}

#[tokio::test]
async fn error_status_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let err = tokio::task::spawn_blocking(move || list_page(base_url, None))
        .await
        .unwrap()
        .unwrap_err();

    assert!(matches!(
        err,
        FetchError::Status { status: 401, ref body } if body == "unauthorized"
    ));
}

#[tokio::test]
async fn mismatched_response_version_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("square-version", "2020-01-01")
                .set_body_json(json!({ "objects": [] })),
        )
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let err = tokio::task::spawn_blocking(move || list_page(base_url, None))
        .await
        .unwrap()
        .unwrap_err();

    assert!(matches!(
        err,
        FetchError::VersionMismatch { ref actual, .. } if actual == "2020-01-01"
    ));
}

#[tokio::test]
async fn matching_response_version_is_accepted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("square-version", DEFAULT_API_VERSION)
                .set_body_json(json!({ "objects": [] })),
        )
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || list_page(base_url, None))
        .await
        .unwrap();

    assert!(result.is_ok());
}

#[tokio::test]
async fn invalid_json_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let err = tokio::task::spawn_blocking(move || list_page(base_url, None))
        .await
        .unwrap()
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn fetch_all_follows_cursor_through_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/catalog/list"))
        .and(query_param("cursor", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [catalog_item("B", "Gadget")]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/catalog/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objects": [catalog_item("A", "Widget")],
            "cursor": "page2"
        })))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let records = tokio::task::spawn_blocking(move || {
        let client = SquareClient::new(&config(&base_url), "t".to_string()).unwrap();
        fetch_all(&client, "ITEM")
    })
    .await
    .unwrap()
    .unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B"]);
}
