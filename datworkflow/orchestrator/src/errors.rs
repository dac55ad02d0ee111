use payload_encrypt::errors::EncryptError;
use proof_request::errors::ProofRequestError;
use registry_bind::errors::BindError;
use reward_claim::errors::RewardError;
use storage_publish::errors::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("payload encryption failed: {0}")]
    Encrypt(#[from] EncryptError),

    #[error("storage publication failed: {0}")]
    Storage(#[from] StorageError),

    #[error("registry binding failed: {0}")]
    Bind(#[from] BindError),

    #[error("proof request failed: {0}")]
    Proof(#[from] ProofRequestError),

    #[error("reward claim failed: {0}")]
    Reward(#[from] RewardError),
}
