//! Test helpers: build the router against a mock image provider.
//!
//! Run from workspace root: `cargo test -p lookbook-api --test shoot_test`.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use lookbook_api::setup::routes;
use lookbook_api::state::AppState;
use lookbook_core::Config;
use tempfile::NamedTempFile;

pub const TEST_API_KEY: &str = "sk-test-key";
pub const REFERENCE_TEXT: &str =
    "Editorial reference: keep skin texture visible and avoid plastic retouching.";

/// Test application: server plus the resources it borrows.
pub struct TestApp {
    pub server: TestServer,
    pub provider: mockito::ServerGuard,
    pub _reference: NamedTempFile,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Knobs for [`setup_test_app_with`].
#[derive(Debug, Clone)]
pub struct TestOptions {
    pub with_api_key: bool,
    pub debug_provider_errors: bool,
    pub max_upload_bytes: usize,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            with_api_key: true,
            debug_provider_errors: false,
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestOptions::default()).await
}

/// Router wired to a fresh mockito server standing in for the provider.
pub async fn setup_test_app_with(options: TestOptions) -> TestApp {
    let provider = mockito::Server::new_async().await;

    let reference = NamedTempFile::new().expect("Failed to create reference file");
    std::fs::write(reference.path(), REFERENCE_TEXT).expect("Failed to write reference file");

    let config = Config {
        openai_api_key: options.with_api_key.then(|| TEST_API_KEY.to_string()),
        openai_base_url: provider.url(),
        reference_doc_path: reference.path().display().to_string(),
        debug_provider_errors: options.debug_provider_errors,
        max_upload_bytes: options.max_upload_bytes,
        ..Config::default()
    };

    let state = Arc::new(AppState::from_config(config.clone()).expect("Failed to build state"));
    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        provider,
        _reference: reference,
    }
}

/// Multipart form carrying only the JSON payload.
pub fn payload_form(payload: &serde_json::Value) -> MultipartForm {
    MultipartForm::new().add_text("payload", payload.to_string())
}

/// Attach a reference image under `field` (`poseRef` or `wardrobeRef`).
pub fn with_reference(form: MultipartForm, field: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(data)
        .file_name(format!("{}.png", field))
        .mime_type("image/png");
    form.add_part(field.to_string(), part)
}

/// Today's date as it appears in generated filenames.
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
