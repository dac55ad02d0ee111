use chain_client::client::DataRegistryClient;
use payload_encrypt::handler::process_payload_encrypt;
use payload_encrypt::models::PayloadEncryptRequest;
use proof_request::handler::process_proof_request;
use proof_request::models::ProofRequestInput;
use proof_request::node::ProofNode;
use registry_bind::handler::bind_file_url;
use reward_claim::handler::process_reward_claim;
use storage_publish::handler::process_storage_publish;
use storage_publish::models::StoragePublishRequest;
use storage_publish::publisher::StoragePublisher;
use tracing::info;
use uuid::Uuid;

use crate::errors::WorkflowError;
use crate::models::{WorkflowReport, WorkflowSettings};

/// The whole contribution sequence: encrypt, publish, bind, request proof,
/// claim reward. Strictly forward, one stage at a time; the only tolerated
/// failure is the proof submission itself, which is reported rather than
/// aborted on.
pub async fn run_workflow(
    settings: WorkflowSettings,
    chain: &dyn DataRegistryClient,
    storage: &dyn StoragePublisher,
    node: &dyn ProofNode,
) -> Result<WorkflowReport, WorkflowError> {
    let run_id = Uuid::now_v7().to_string();
    info!(run_id = %run_id, "starting contribution workflow");

    let encrypted = process_payload_encrypt(
        chain,
        PayloadEncryptRequest {
            record: settings.record,
            encryption_seed: settings.encryption_seed.clone(),
        },
    )
    .await?;
    info!(ciphertext_len = encrypted.ciphertext.len(), "payload encrypted");

    let published = process_storage_publish(
        storage,
        StoragePublishRequest {
            file_name: settings.data_file_name,
            data: encrypted.ciphertext,
        },
    )
    .await?;
    info!(url = %published.url, "ciphertext published to storage");

    let bound = bind_file_url(chain, &published.url).await?;
    info!(
        file_id = bound.file_id,
        newly_registered = bound.newly_registered,
        "file bound to registry"
    );

    let proof = process_proof_request(
        chain,
        node,
        ProofRequestInput {
            file_id: bound.file_id,
            file_url: published.url.clone(),
            password: encrypted.password,
            encryption_seed: settings.encryption_seed,
            min_reward: settings.min_reward,
            artifact_path: settings.proof_request_path,
        },
    )
    .await?;

    let reward = process_reward_claim(chain, bound.file_id).await?;

    info!(run_id = %run_id, file_id = bound.file_id, "contribution workflow finished");
    Ok(WorkflowReport {
        run_id,
        file_id: bound.file_id,
        newly_registered: bound.newly_registered,
        job_id: proof.job_id,
        storage_url: published.url,
        submission: proof.submission,
        reward_claimed: reward.file_id == bound.file_id,
    })
}
