use crate::errors::internal::InternalError;
use poem::error::ResponseError;
use poem::http::StatusCode;
use thiserror::Error;

/// Page error types
///
/// The display text is the generic status message shown to every visitor.
/// `detail` carries the underlying cause and is only rendered in development.
#[derive(Error, Debug)]
pub enum PageError {
    /// Addressed record does not exist
    #[error("Not Found")]
    NotFound { detail: String },

    /// Store, upload or rendering failure
    #[error("Internal Server Error")]
    Internal { detail: String },
}

impl PageError {
    /// Convert InternalError to PageError
    ///
    /// This is the explicit conversion point from internal errors to page errors.
    /// Details are logged here and kept for development-mode rendering only.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Record(_) => {
                tracing::debug!("Record lookup failed: {}", err);
                Self::NotFound {
                    detail: err.to_string(),
                }
            }
            InternalError::Upload(_) => {
                tracing::error!("Image upload failed, operation abandoned: {}", err);
                Self::Internal {
                    detail: err.to_string(),
                }
            }
            _ => {
                tracing::error!("Unexpected error handling page request: {}", err);
                Self::Internal {
                    detail: err.to_string(),
                }
            }
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            PageError::NotFound { detail } => detail,
            PageError::Internal { detail } => detail,
        }
    }
}

impl ResponseError for PageError {
    fn status(&self) -> StatusCode {
        match self {
            PageError::NotFound { .. } => StatusCode::NOT_FOUND,
            PageError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
