use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Record not found in {collection}: {id}")]
    NotFound { collection: String, id: String },
}
