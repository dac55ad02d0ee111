use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use chain_client::client::DataRegistryClient;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::errors::EncryptError;
use crate::models::{PayloadEncryptRequest, PayloadEncryptResponse};

pub const NONCE_SIZE: usize = 12;
pub const TAG_SIZE: usize = 16;

pub async fn process_payload_encrypt(
    signer: &dyn DataRegistryClient,
    req: PayloadEncryptRequest,
) -> Result<PayloadEncryptResponse, EncryptError> {
    if req.encryption_seed.trim().is_empty() {
        return Err(EncryptError::InvalidRequest(
            "encryption_seed cannot be empty".to_string(),
        ));
    }

    let plaintext = serde_json::to_vec(&req.record)
        .map_err(|e| EncryptError::InvalidRequest(format!("record serialization failed: {e}")))?;

    let password = signer
        .sign_seed(&req.encryption_seed)
        .await
        .map_err(|e| EncryptError::PasswordDerivation(e.to_string()))?;
    if password.trim().is_empty() {
        return Err(EncryptError::PasswordDerivation(
            "signer returned an empty signature".to_string(),
        ));
    }

    let ciphertext = encrypt_payload(&password, &plaintext)?;

    Ok(PayloadEncryptResponse { ciphertext, password })
}

/// Output layout: `nonce(12) || ciphertext || tag(16)`.
pub fn encrypt_payload(password: &str, plaintext: &[u8]) -> Result<Vec<u8>, EncryptError> {
    let cipher = Aes256Gcm::new_from_slice(&derive_key(password))
        .map_err(|e| EncryptError::Encryption(e.to_string()))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let sealed = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| EncryptError::Encryption(e.to_string()))?;

    let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Counterpart of [`encrypt_payload`]; the verification node runs the same
/// recovery after unwrapping the password.
pub fn decrypt_payload(password: &str, ciphertext: &[u8]) -> Result<Vec<u8>, EncryptError> {
    if ciphertext.len() < NONCE_SIZE + TAG_SIZE {
        return Err(EncryptError::InvalidCiphertext);
    }

    let cipher = Aes256Gcm::new_from_slice(&derive_key(password))
        .map_err(|e| EncryptError::Decryption(e.to_string()))?;

    let nonce = Nonce::from_slice(&ciphertext[..NONCE_SIZE]);
    cipher
        .decrypt(nonce, &ciphertext[NONCE_SIZE..])
        .map_err(|e| EncryptError::Decryption(e.to_string()))
}

// The wallet signature is an arbitrary-length hex string; pin it to the
// AES-256 key width.
fn derive_key(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}
