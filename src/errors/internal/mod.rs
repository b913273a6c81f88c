use thiserror::Error;

pub mod database;
pub mod record;
pub mod upload;
pub mod view;

pub use database::DatabaseError;
pub use record::RecordError;
pub use upload::UploadError;
pub use view::ViewError;

/// Internal error type for store, provider and coordinator operations
///
/// Infrastructure errors (database, parse) sit next to the domain errors of
/// each collaborator. Not exposed over HTTP - the page layer converts these
/// into `PageError` and logs the details.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    View(#[from] ViewError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    /// Create a parse error with context
    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::Record(RecordError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })
    }

    /// True when the error means the addressed record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, InternalError::Record(RecordError::NotFound { .. }))
    }
}
