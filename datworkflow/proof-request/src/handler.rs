use std::fs;
use std::path::Path;

use chain_client::client::DataRegistryClient;
use rand::rngs::OsRng;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};
use tracing::{info, warn};

use crate::errors::ProofRequestError;
use crate::models::{ProofRequest, ProofRequestInput, ProofRequestReport, SubmissionStatus};
use crate::node::ProofNode;

pub async fn process_proof_request(
    chain: &dyn DataRegistryClient,
    node: &dyn ProofNode,
    input: ProofRequestInput,
) -> Result<ProofRequestReport, ProofRequestError> {
    validate_input(&input)?;

    chain
        .request_proof(input.file_id, input.min_reward)
        .await
        .map_err(ProofRequestError::Schedule)?;

    let job_ids = chain
        .file_job_ids(input.file_id)
        .await
        .map_err(ProofRequestError::Discovery)?;
    let job_id = most_recent_job(&job_ids).ok_or(ProofRequestError::NoJobsForFile {
        file_id: input.file_id,
    })?;

    let job = chain.job(job_id).await.map_err(ProofRequestError::Discovery)?;
    let node_info = chain
        .node(&job.node_address)
        .await
        .map_err(ProofRequestError::Discovery)?;
    if node_info.url.trim().is_empty() {
        return Err(ProofRequestError::MissingNodeUrl {
            address: job.node_address,
        });
    }

    let encryption_key = wrap_encryption_key(&node_info.public_key, &input.password)?;

    let request = ProofRequest {
        job_id,
        file_id: input.file_id,
        file_url: input.file_url,
        encryption_key,
        encryption_seed: input.encryption_seed,
        nonce: None,
        proof_url: None,
    };

    // Persisted before any network submission so a failed POST still leaves
    // an inspectable artifact.
    persist_request(&input.artifact_path, &request)?;
    info!(
        job_id,
        path = %input.artifact_path.display(),
        "proof request persisted"
    );

    let submission = match node.submit(&node_info.url, &request).await {
        Ok(status) => {
            match &status {
                SubmissionStatus::Accepted => info!(job_id, "proof request accepted by node"),
                SubmissionStatus::Rejected { status } => {
                    warn!(job_id, status = *status, "node rejected proof request");
                }
                SubmissionStatus::Failed { reason } => {
                    warn!(job_id, reason = %reason, "proof submission failed");
                }
            }
            status
        }
        Err(e) => {
            warn!(job_id, error = %e, "proof submission failed");
            SubmissionStatus::Failed {
                reason: e.to_string(),
            }
        }
    };

    Ok(ProofRequestReport {
        job_id,
        node_url: node_info.url,
        submission,
        request,
    })
}

/// Selection policy for the active job: job ids arrive in creation order, so
/// the last entry is the most recently created job. Swap this out to change
/// the tie-break without touching discovery.
pub fn most_recent_job(job_ids: &[u64]) -> Option<u64> {
    job_ids.last().copied()
}

/// PKCS#1 v1.5 public-key encryption of the symmetric password, hex-encoded,
/// so only the assigned node can recover it.
pub fn wrap_encryption_key(
    public_key_pem: &str,
    password: &str,
) -> Result<String, ProofRequestError> {
    let public_key = RsaPublicKey::from_pkcs1_pem(public_key_pem)
        .map_err(|e| ProofRequestError::KeyWrap(format!("invalid node public key: {e}")))?;

    let mut rng = OsRng;
    let wrapped = public_key
        .encrypt(&mut rng, Pkcs1v15Encrypt, password.as_bytes())
        .map_err(|e| ProofRequestError::KeyWrap(format!("rsa encryption failed: {e}")))?;

    Ok(hex::encode(wrapped))
}

fn persist_request(path: &Path, request: &ProofRequest) -> Result<(), ProofRequestError> {
    let body = serde_json::to_vec_pretty(request)
        .map_err(|e| ProofRequestError::Persist(format!("failed to serialize proof request: {e}")))?;
    fs::write(path, body)
        .map_err(|e| ProofRequestError::Persist(format!("failed to write `{}`: {e}", path.display())))
}

fn validate_input(input: &ProofRequestInput) -> Result<(), ProofRequestError> {
    if input.file_id == 0 {
        return Err(ProofRequestError::InvalidRequest(
            "file_id must be a registered id".to_string(),
        ));
    }
    if input.file_url.trim().is_empty() {
        return Err(ProofRequestError::InvalidRequest(
            "file_url cannot be empty".to_string(),
        ));
    }
    if input.password.is_empty() {
        return Err(ProofRequestError::InvalidRequest(
            "password cannot be empty".to_string(),
        ));
    }
    if input.encryption_seed.trim().is_empty() {
        return Err(ProofRequestError::InvalidRequest(
            "encryption_seed cannot be empty".to_string(),
        ));
    }
    Ok(())
}
