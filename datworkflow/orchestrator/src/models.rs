use std::path::PathBuf;

use payload_encrypt::models::TrainingRecord;
use proof_request::models::SubmissionStatus;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub record: TrainingRecord,
    pub encryption_seed: String,
    pub data_file_name: String,
    pub min_reward: u64,
    pub proof_request_path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowReport {
    pub run_id: String,
    pub file_id: u64,
    pub newly_registered: bool,
    pub job_id: u64,
    pub storage_url: String,
    pub submission: SubmissionStatus,
    pub reward_claimed: bool,
}
