use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Wire body POSTed to `{node_url}/proof`, also persisted verbatim as the
/// audit artifact. `nonce` and `proof_url` are reserved for the node and
/// always serialize as null here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRequest {
    pub job_id: u64,
    pub file_id: u64,
    pub file_url: String,
    pub encryption_key: String,
    pub encryption_seed: String,
    pub nonce: Option<String>,
    pub proof_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProofRequestInput {
    pub file_id: u64,
    pub file_url: String,
    pub password: String,
    pub encryption_seed: String,
    pub min_reward: u64,
    pub artifact_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionStatus {
    Accepted,
    Rejected { status: u16 },
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ProofRequestReport {
    pub job_id: u64,
    pub node_url: String,
    pub submission: SubmissionStatus,
    pub request: ProofRequest,
}
