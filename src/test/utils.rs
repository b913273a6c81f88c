// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::{AppEnvironment, DatabaseConnections};
use crate::errors::internal::UploadError;
use crate::providers::MediaUploader;

/// Creates an in-memory database with the inventory schema applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Creates AppData over a fresh in-memory database
///
/// Runs in development mode so error pages carry details.
pub async fn setup_test_app_data(media_uploader: Arc<dyn MediaUploader>) -> Arc<AppData> {
    let connections = DatabaseConnections {
        inventory: setup_test_db().await,
    };

    Arc::new(
        AppData::with_uploader(connections, AppEnvironment::Development, media_uploader)
            .expect("Failed to create AppData"),
    )
}

/// Uploader double that never leaves the process
///
/// Counts calls so tests can assert whether an upload happened.
#[derive(Clone)]
pub struct StubUploader {
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl StubUploader {
    pub const URL: &'static str = "https://media.test/image/upload/stub.png";

    pub fn succeeding() -> Self {
        Self {
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl MediaUploader for StubUploader {
    async fn upload(&self, _bytes: Vec<u8>) -> Result<String, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(UploadError::Transport("stub upload failure".to_string()));
        }
        Ok(Self::URL.to_string())
    }
}
