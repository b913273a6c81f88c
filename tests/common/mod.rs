// Common test utilities for integration tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use poem::test::TestClient;
use poem::Endpoint;

use inventory_backend::api::build_routes;
use inventory_backend::app_data::AppData;
use inventory_backend::config::{AppEnvironment, DatabaseConnections};
use inventory_backend::errors::internal::UploadError;
use inventory_backend::providers::MediaUploader;

pub const UPLOADED_URL: &str = "https://media.test/image/upload/widget.png";

/// Uploader that answers with a fixed URL and counts calls
#[derive(Clone, Default)]
pub struct RecordingUploader {
    pub calls: Arc<AtomicUsize>,
}

impl RecordingUploader {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaUploader for RecordingUploader {
    async fn upload(&self, _bytes: Vec<u8>) -> Result<String, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(UPLOADED_URL.to_string())
    }
}

/// Uploader whose host always refuses the file
pub struct RejectingUploader;

#[async_trait]
impl MediaUploader for RejectingUploader {
    async fn upload(&self, _bytes: Vec<u8>) -> Result<String, UploadError> {
        Err(UploadError::Rejected {
            status: 401,
            body: "Invalid Signature".to_string(),
        })
    }
}

/// Creates AppData over a migrated in-memory database
pub async fn setup_test_app_data(
    app_env: AppEnvironment,
    media_uploader: Arc<dyn MediaUploader>,
) -> Arc<AppData> {
    let connections = DatabaseConnections::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    connections
        .migrate()
        .await
        .expect("Failed to run migrations");

    Arc::new(
        AppData::with_uploader(connections, app_env, media_uploader)
            .expect("Failed to create AppData"),
    )
}

/// Full application behind a test client, in development mode
pub async fn setup_test_app(
    media_uploader: Arc<dyn MediaUploader>,
) -> (Arc<AppData>, TestClient<impl Endpoint>) {
    let app_data = setup_test_app_data(AppEnvironment::Development, media_uploader).await;
    let client = TestClient::new(build_routes(app_data.clone()));
    (app_data, client)
}

/// Location header of a redirect response
pub fn location(response: &poem::test::TestResponse) -> String {
    response
        .0
        .headers()
        .get(poem::http::header::LOCATION)
        .expect("Missing Location header")
        .to_str()
        .expect("Location is not ASCII")
        .to_string()
}
