use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("provider error: {0}")]
    Provider(String),

    #[error("wallet error: {0}")]
    Wallet(String),

    #[error("contract error: {0}")]
    Contract(String),

    #[error("transaction reverted: {what}: tx={tx_hash}")]
    TxReverted { what: String, tx_hash: String },

    #[error("value out of range: {0}")]
    ValueOutOfRange(String),

    #[error("signing failed: {0}")]
    Signing(String),
}
