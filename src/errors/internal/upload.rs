use thiserror::Error;

/// Failures of the media host upload call
///
/// None of these are retried. The caller abandons the whole operation.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Media host credentials are not configured")]
    NotConfigured,

    #[error("Upload request failed: {0}")]
    Transport(String),

    #[error("Media host rejected upload with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Media host returned a malformed response: {0}")]
    MalformedResponse(String),
}
