// Providers layer - Clients for services outside the process
pub mod media_uploader;

pub use media_uploader::{CloudinaryUploader, MediaUploader};
