use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRecord {
    pub timestamp: String,
    pub data_type: String,
    pub content: RecordContent,
    pub metadata: RecordMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordContent {
    pub user_preferences: UserPreferences,
    pub behavioral_data: BehavioralData,
    pub personal_metrics: PersonalMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub language: String,
    pub region: String,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralData {
    pub session_duration_secs: u32,
    pub interaction_count: u32,
    pub feature_usage: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalMetrics {
    pub age: u32,
    pub profession: String,
    pub experience: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    pub version: String,
    pub source: String,
    pub encryption_method: String,
}

#[derive(Debug, Clone)]
pub struct PayloadEncryptRequest {
    pub record: TrainingRecord,
    pub encryption_seed: String,
}

#[derive(Debug, Clone)]
pub struct PayloadEncryptResponse {
    pub ciphertext: Vec<u8>,
    pub password: String,
}
