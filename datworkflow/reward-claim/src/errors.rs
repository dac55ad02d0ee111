use chain_client::errors::ChainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RewardError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("reward request failed: {0}")]
    Claim(ChainError),
}
