use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use sha1::{Digest, Sha1};

use crate::config::MediaCredentials;
use crate::errors::internal::UploadError;

const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Uploads an image and hands back its durable public URL
///
/// One call per request, never retried.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>) -> Result<String, UploadError>;
}

/// Signed uploads to Cloudinary's image endpoint
pub struct CloudinaryUploader {
    client: reqwest::Client,
    credentials: Option<MediaCredentials>,
    api_base: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryUploader {
    /// Without credentials every upload fails with `UploadError::NotConfigured`
    pub fn new(credentials: Option<MediaCredentials>) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            api_base: CLOUDINARY_API_BASE.to_string(),
        }
    }

    /// Point the uploader at another Cloudinary-compatible API root
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn upload_url(&self, cloud_name: &str) -> String {
        format!("{}/{}/image/upload", self.api_base, cloud_name)
    }

    /// SHA-1 hex digest of the signed parameters followed by the API secret
    ///
    /// `timestamp` is the only signed parameter this uploader sends.
    pub fn sign(timestamp: i64, api_secret: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(format!("timestamp={}{}", timestamp, api_secret).as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, bytes: Vec<u8>) -> Result<String, UploadError> {
        let credentials = self.credentials.as_ref().ok_or(UploadError::NotConfigured)?;

        let timestamp = Utc::now().timestamp();
        let signature = Self::sign(timestamp, &credentials.api_secret);

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name("upload"),
            )
            .text("api_key", credentials.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature);

        let response = self
            .client
            .post(self.upload_url(&credentials.cloud_name))
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::MalformedResponse(e.to_string()))?;

        tracing::debug!("Uploaded image to {}", uploaded.secure_url);

        Ok(uploaded.secure_url)
    }
}

impl std::fmt::Debug for CloudinaryUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryUploader")
            .field("credentials", &self.credentials)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> MediaCredentials {
        MediaCredentials {
            cloud_name: "demo".to_string(),
            api_key: "1234".to_string(),
            api_secret: "abcd".to_string(),
        }
    }

    #[test]
    fn test_sign_matches_cloudinary_scheme() {
        let signature = CloudinaryUploader::sign(1315060510, "abcd");

        assert_eq!(signature, "a21ad0f63beb4de2e5575204b79ab90bffb02c10");
    }

    #[test]
    fn test_upload_url_uses_cloud_name() {
        let uploader = CloudinaryUploader::new(Some(credentials()));

        assert_eq!(
            uploader.upload_url("demo"),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }

    #[tokio::test]
    async fn test_upload_without_credentials_fails() {
        let uploader = CloudinaryUploader::new(None);

        let result = uploader.upload(vec![1, 2, 3]).await;

        assert!(matches!(result, Err(UploadError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let uploader =
            CloudinaryUploader::new(Some(credentials())).with_api_base("http://127.0.0.1:9");

        let result = uploader.upload(vec![1, 2, 3]).await;

        assert!(matches!(result, Err(UploadError::Transport(_))));
    }

    #[test]
    fn test_debug_output_redacts_secret() {
        let uploader = CloudinaryUploader::new(Some(credentials()));

        assert!(!format!("{:?}", uploader).contains("abcd"));
    }
}
