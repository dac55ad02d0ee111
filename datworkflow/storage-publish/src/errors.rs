use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("http client error: {0}")]
    Client(String),

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("upload rejected: status={status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid file metadata: {0}")]
    InvalidMeta(String),
}
