use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("cafe must carry an id")]
    MissingId,
    #[error("a cafe with that id already exists")]
    DuplicateId,
    #[error("path id does not match body id")]
    IdMismatch,
    #[error("no cafe with that id")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(String),
}
