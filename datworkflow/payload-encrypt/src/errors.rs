use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncryptError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("password derivation failed: {0}")]
    PasswordDerivation(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("invalid ciphertext length")]
    InvalidCiphertext,
}
