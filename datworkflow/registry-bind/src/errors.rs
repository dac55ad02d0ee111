use chain_client::errors::ChainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("registry lookup failed: {0}")]
    Lookup(ChainError),

    #[error("registration failed: {0}")]
    Register(ChainError),

    #[error("registration incomplete: registry still reports `{url}` as unregistered")]
    RegistrationIncomplete { url: String },
}
