use crate::errors::StorageError;
use crate::models::{FileUpload, StoragePublishRequest, StoragePublishResponse};
use crate::publisher::StoragePublisher;

pub async fn process_storage_publish(
    publisher: &dyn StoragePublisher,
    req: StoragePublishRequest,
) -> Result<StoragePublishResponse, StorageError> {
    if req.file_name.trim().is_empty() {
        return Err(StorageError::InvalidRequest(
            "file_name cannot be empty".to_string(),
        ));
    }
    if req.data.is_empty() {
        return Err(StorageError::InvalidRequest(
            "upload data cannot be empty".to_string(),
        ));
    }

    let meta = publisher
        .upload(FileUpload {
            name: req.file_name,
            data: req.data,
        })
        .await?;
    if meta.id.trim().is_empty() {
        return Err(StorageError::InvalidMeta(
            "publisher returned an empty storage id".to_string(),
        ));
    }

    let url = publisher.share_link(&meta.id).await?;
    if url.trim().is_empty() {
        return Err(StorageError::InvalidMeta(
            "publisher returned an empty share link".to_string(),
        ));
    }

    Ok(StoragePublishResponse {
        storage_id: meta.id,
        url,
    })
}
