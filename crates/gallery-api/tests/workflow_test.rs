//! End-to-end flows across upload, publish and listing.
//!
//! Run with: `cargo test -p gallery-api --test workflow_test`

mod helpers;

use axum::http::StatusCode;
use helpers::fixtures::{ada_fields, ada_upload, upload_form};
use helpers::{publisher_auth, setup_test_app, setup_test_app_with};
use serde_json::{json, Value};
use tempfile::TempDir;

#[tokio::test]
async fn test_upload_publish_list_workflow() {
    let app = setup_test_app().await;

    let mut ids = Vec::new();
    for _ in 0..2 {
        let body: Value = app
            .client()
            .post("/upload")
            .multipart(ada_upload(600, 600))
            .await
            .json();
        ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    let all: Value = app.client().get("/images").await.json();
    assert_eq!(all["success"], true);
    let mut listed: Vec<String> = all["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f.as_str().unwrap().to_string())
        .collect();
    listed.sort();
    let mut expected: Vec<String> = ids.iter().map(|id| format!("{}.png", id)).collect();
    expected.sort();
    assert_eq!(listed, expected);

    let published: Value = app.client().get("/images/published").await.json();
    assert_eq!(published["data"], json!([]));

    let response = app
        .client()
        .post("/publish")
        .add_header("Authorization", publisher_auth())
        .form(&[("i", ids[1].as_str())])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let published: Value = app.client().get("/images/published").await.json();
    assert_eq!(published["data"], json!([format!("{}.png", ids[1])]));

    // Listings carry filenames only.
    let all = app.client().get("/images").await.text();
    assert!(!all.contains("Lovelace"));
    assert!(!all.contains("ada@example.com"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = setup_test_app().await;

    let live = app.client().get("/health/live").await;
    assert_eq!(live.status_code(), StatusCode::OK);

    let ready = app.client().get("/health/ready").await;
    assert_eq!(ready.status_code(), StatusCode::OK);
    let body: Value = ready.json();
    assert_eq!(body["data"]["status"], "ready");
    assert_eq!(body["data"]["metadata_store"], "healthy");
}

#[tokio::test]
async fn test_configured_minimum_size_is_honored() {
    let image_dir = TempDir::new().unwrap();
    let app = setup_test_app_with(image_dir, |config| {
        config.min_width = 100;
        config.min_height = 100;
    })
    .await;

    let response = app.client().post("/upload").multipart(ada_upload(120, 120)).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let image_dir = TempDir::new().unwrap();
    let app = setup_test_app_with(image_dir, |config| {
        config.max_file_size_bytes = 1024;
    })
    .await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(&ada_fields(), Some(vec![0u8; 256 * 1024])))
        .await;
    assert!(response.status_code().is_client_error());
    assert!(app.stored_files().is_empty());
}
