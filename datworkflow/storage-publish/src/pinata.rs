use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::errors::StorageError;
use crate::models::{FileMeta, FileUpload};
use crate::publisher::StoragePublisher;

const DEFAULT_API_BASE: &str = "https://api.pinata.cloud";
const DEFAULT_GATEWAY_BASE: &str = "https://gateway.pinata.cloud";

/// Pinata-style IPFS pinning service client.
pub struct PinataPublisher {
    http: Client,
    jwt: String,
    api_base: String,
    gateway_base: String,
}

impl PinataPublisher {
    pub fn new(jwt: impl Into<String>) -> Result<Self, StorageError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| StorageError::Client(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            jwt: jwt.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            gateway_base: DEFAULT_GATEWAY_BASE.to_string(),
        })
    }

    pub fn with_endpoints(mut self, api_base: &str, gateway_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self.gateway_base = gateway_base.trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

#[async_trait]
impl StoragePublisher for PinataPublisher {
    async fn upload(&self, upload: FileUpload) -> Result<FileMeta, StorageError> {
        let endpoint = format!(
            "{}/pinning/pinFileToIPFS",
            self.api_base.trim_end_matches('/')
        );

        let part = Part::bytes(upload.data).file_name(upload.name);
        let form = Form::new().part("file", part);

        let resp = self
            .http
            .post(endpoint)
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::Upload(format!("upload request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let payload = resp
            .json::<PinResponse>()
            .await
            .map_err(|e| StorageError::Upload(format!("failed to parse pin response: {e}")))?;

        Ok(FileMeta {
            id: payload.ipfs_hash,
        })
    }

    async fn share_link(&self, id: &str) -> Result<String, StorageError> {
        if id.trim().is_empty() {
            return Err(StorageError::InvalidMeta(
                "storage id cannot be empty".to_string(),
            ));
        }
        Ok(format!(
            "{}/ipfs/{}",
            self.gateway_base.trim_end_matches('/'),
            id
        ))
    }
}
