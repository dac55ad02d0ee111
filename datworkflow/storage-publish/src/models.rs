use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMeta {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct StoragePublishRequest {
    pub file_name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoragePublishResponse {
    pub storage_id: String,
    pub url: String,
}
