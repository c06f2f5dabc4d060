//! Shared setup for the HTTP integration tests.
//!
//! The app runs in-process against the in-memory metadata store and a
//! temporary image directory, so no external services are needed.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use gallery_api::setup::build_app;
use gallery_api::AppState;
use gallery_core::{Config, MetadataBackend};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub const PUBLISHER_USERNAME: &str = "editor";
pub const PUBLISHER_PASSWORD: &str = "correct horse battery staple";

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    image_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn image_dir(&self) -> &Path {
        self.image_dir.path()
    }

    /// Sorted file names currently in the image directory.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.image_dir())
            .expect("read image dir")
            .map(|e| e.expect("dir entry").file_name().into_string().expect("utf-8 name"))
            .collect();
        names.sort();
        names
    }
}

pub fn create_test_config(image_dir: &Path) -> Config {
    Config {
        metadata_backend: MetadataBackend::Memory,
        image_dir: image_dir.to_path_buf(),
        publisher_username: PUBLISHER_USERNAME.to_string(),
        publisher_password: PUBLISHER_PASSWORD.to_string(),
        ..Config::default()
    }
}

pub async fn setup_test_app() -> TestApp {
    let image_dir = TempDir::new().expect("Failed to create temp dir");
    setup_test_app_with(image_dir, |_| {}).await
}

/// Like [`setup_test_app`], with a hook to adjust the configuration.
pub async fn setup_test_app_with(image_dir: TempDir, adjust: impl FnOnce(&mut Config)) -> TestApp {
    let mut config = create_test_config(image_dir.path());
    adjust(&mut config);

    let (state, app) = build_app(&config).await.expect("Failed to build app");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        state,
        image_dir,
    }
}

pub fn basic_auth(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", username, password))
    )
}

pub fn publisher_auth() -> String {
    basic_auth(PUBLISHER_USERNAME, PUBLISHER_PASSWORD)
}
