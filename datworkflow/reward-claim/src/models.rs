use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RewardClaimResponse {
    pub file_id: u64,
}
