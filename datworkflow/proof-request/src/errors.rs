use chain_client::errors::ChainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProofRequestError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("proof scheduling failed: {0}")]
    Schedule(ChainError),

    #[error("node discovery failed: {0}")]
    Discovery(ChainError),

    #[error("no jobs found for file {file_id}")]
    NoJobsForFile { file_id: u64 },

    #[error("node {address} has no reachable url")]
    MissingNodeUrl { address: String },

    #[error("key wrapping failed: {0}")]
    KeyWrap(String),

    #[error("artifact persistence failed: {0}")]
    Persist(String),

    #[error("submission failed: {0}")]
    Submit(String),
}
