use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::errors::ProofRequestError;
use crate::models::{ProofRequest, SubmissionStatus};

/// Verification-node HTTP collaborator. Transport failures surface as `Err`;
/// any delivered response maps to a [`SubmissionStatus`].
#[async_trait]
pub trait ProofNode: Send + Sync {
    async fn submit(
        &self,
        node_url: &str,
        request: &ProofRequest,
    ) -> Result<SubmissionStatus, ProofRequestError>;
}

pub struct HttpProofNode {
    http: Client,
}

impl HttpProofNode {
    pub fn new() -> Result<Self, ProofRequestError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ProofRequestError::Submit(format!("failed to build http client: {e}")))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ProofNode for HttpProofNode {
    async fn submit(
        &self,
        node_url: &str,
        request: &ProofRequest,
    ) -> Result<SubmissionStatus, ProofRequestError> {
        let endpoint = format!("{}/proof", node_url.trim_end_matches('/'));

        let resp = self
            .http
            .post(endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ProofRequestError::Submit(format!("proof submission failed: {e}")))?;

        // Acceptance is exactly 200, not any 2xx.
        if resp.status() == StatusCode::OK {
            return Ok(SubmissionStatus::Accepted);
        }
        Ok(SubmissionStatus::Rejected {
            status: resp.status().as_u16(),
        })
    }
}
