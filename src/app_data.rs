use std::sync::Arc;

use crate::config::{AppEnvironment, BootstrapSettings, DatabaseConnections};
use crate::errors::InternalError;
use crate::providers::{CloudinaryUploader, MediaUploader};
use crate::services::ViewRenderer;
use crate::stores::{CategoryStore, ItemStore};

/// Centralized application data following the main-owned stores pattern
///
/// Everything is created once in main.rs and shared read-only across
/// coordinators and handlers.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ├─ connections (DatabaseConnections)
///   ├─ category_store (Arc<CategoryStore>)
///   ├─ item_store (Arc<ItemStore>)
///   ├─ media_uploader (Arc<dyn MediaUploader>)
///   └─ view_renderer (Arc<ViewRenderer>)
///   ↓ wrapped in Arc<AppData>
///   ├─ CategoryCoordinator::new(app_data)
///   ├─ ItemCoordinator::new(app_data)
///   └─ HomeCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub connections: DatabaseConnections,
    pub app_env: AppEnvironment,
    pub category_store: Arc<CategoryStore>,
    pub item_store: Arc<ItemStore>,
    pub media_uploader: Arc<dyn MediaUploader>,
    pub view_renderer: Arc<ViewRenderer>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// Database connections should be initialized and migrated before calling this.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when the templates fail to compile
    pub fn init(
        connections: DatabaseConnections,
        settings: &BootstrapSettings,
    ) -> Result<Self, InternalError> {
        if settings.media().is_none() {
            tracing::warn!("Cloudinary credentials not set; image uploads will fail");
        }
        let media_uploader: Arc<dyn MediaUploader> =
            Arc::new(CloudinaryUploader::new(settings.media().cloned()));

        Self::with_uploader(connections, settings.app_env(), media_uploader)
    }

    /// Build with an explicit uploader
    pub fn with_uploader(
        connections: DatabaseConnections,
        app_env: AppEnvironment,
        media_uploader: Arc<dyn MediaUploader>,
    ) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");
        let db = connections.inventory.clone();

        let category_store = Arc::new(CategoryStore::new(db.clone()));
        let item_store = Arc::new(ItemStore::new(db));

        let view_renderer = Arc::new(ViewRenderer::new()?);

        tracing::info!("AppData initialization complete");

        Ok(Self {
            connections,
            app_env,
            category_store,
            item_store,
            media_uploader,
            view_renderer,
        })
    }
}
