use async_trait::async_trait;

use crate::errors::StorageError;
use crate::models::{FileMeta, FileUpload};

/// Content-addressed storage collaborator: pin a blob, then resolve a durable
/// shareable URL for it.
#[async_trait]
pub trait StoragePublisher: Send + Sync {
    async fn upload(&self, upload: FileUpload) -> Result<FileMeta, StorageError>;

    async fn share_link(&self, id: &str) -> Result<String, StorageError>;
}
