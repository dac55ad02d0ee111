use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ChainError;

/// Sentinel file id the registry returns for URLs it has never seen.
pub const UNREGISTERED_FILE_ID: u64 = 0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub job_id: u64,
    pub node_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInfo {
    pub url: String,
    pub public_key: String,
}

/// Everything the contribution workflow needs from the data registry chain,
/// including the wallet signing capability used for password derivation.
#[async_trait]
pub trait DataRegistryClient: Send + Sync {
    async fn file_id_by_url(&self, url: &str) -> Result<u64, ChainError>;

    async fn add_file(&self, url: &str) -> Result<u64, ChainError>;

    async fn request_proof(&self, file_id: u64, min_reward: u64) -> Result<(), ChainError>;

    /// Job ids for a file, in creation order (oldest first).
    async fn file_job_ids(&self, file_id: u64) -> Result<Vec<u64>, ChainError>;

    async fn job(&self, job_id: u64) -> Result<Job, ChainError>;

    async fn node(&self, node_address: &str) -> Result<NodeInfo, ChainError>;

    async fn request_reward(&self, file_id: u64) -> Result<(), ChainError>;

    async fn sign_seed(&self, seed: &str) -> Result<String, ChainError>;
}
