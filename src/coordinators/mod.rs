// Coordinators layer - Request workflows (validate, upload, persist, choose view)
pub mod category_coordinator;
pub mod home_coordinator;
pub mod item_coordinator;

pub use category_coordinator::CategoryCoordinator;
pub use home_coordinator::HomeCoordinator;
pub use item_coordinator::ItemCoordinator;

use crate::errors::InternalError;
use crate::providers::MediaUploader;

/// Result of a create or update submission
#[derive(Debug)]
pub enum FormOutcome<V> {
    /// Validation failed; nothing was written. Carries the form to re-render.
    Rejected(V),
    /// Record persisted; the client should be sent to `url`
    Committed { id: String, url: String },
}

/// Upload the attached image, if any
///
/// An upload failure aborts the surrounding create or update.
pub(crate) async fn upload_attached(
    uploader: &dyn MediaUploader,
    image: Option<Vec<u8>>,
) -> Result<Option<String>, InternalError> {
    match image {
        Some(bytes) => {
            tracing::debug!("Uploading attached image ({} bytes)", bytes.len());
            let url = uploader.upload(bytes).await?;
            Ok(Some(url))
        }
        None => Ok(None),
    }
}
