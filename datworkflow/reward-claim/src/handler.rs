use chain_client::client::{DataRegistryClient, UNREGISTERED_FILE_ID};
use tracing::info;

use crate::errors::RewardError;
use crate::models::RewardClaimResponse;

pub async fn process_reward_claim(
    chain: &dyn DataRegistryClient,
    file_id: u64,
) -> Result<RewardClaimResponse, RewardError> {
    if file_id == UNREGISTERED_FILE_ID {
        return Err(RewardError::InvalidRequest(
            "file_id must be a registered id".to_string(),
        ));
    }

    chain
        .request_reward(file_id)
        .await
        .map_err(RewardError::Claim)?;

    info!(file_id, "reward requested");
    Ok(RewardClaimResponse { file_id })
}
