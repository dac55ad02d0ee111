use chain_client::chain::{ChainConfig, EvmRegistryClient};
use chrono::Utc;
use orchestrator::config::AppConfig;
use orchestrator::models::WorkflowSettings;
use orchestrator::workflow::run_workflow;
use payload_encrypt::models::{
    BehavioralData, PersonalMetrics, RecordContent, RecordMetadata, TrainingRecord,
    UserPreferences,
};
use proof_request::node::HttpProofNode;
use storage_publish::pinata::PinataPublisher;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    init_logging();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "config error");
            std::process::exit(1);
        }
    };

    if config.ipfs_jwt.is_none() {
        warn!("IPFS_JWT not set; storage uploads may be rejected");
    }

    let chain = match EvmRegistryClient::connect(ChainConfig {
        rpc_url: config.rpc_url.clone(),
        private_key: config.private_key.clone(),
        chain_id: config.chain_id,
        registry_address: config.registry_address.clone(),
    }) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "chain client init failed");
            std::process::exit(1);
        }
    };

    let storage = match PinataPublisher::new(config.ipfs_jwt.clone().unwrap_or_default()) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "storage client init failed");
            std::process::exit(1);
        }
    };

    let node = match HttpProofNode::new() {
        Ok(n) => n,
        Err(e) => {
            error!(error = %e, "node client init failed");
            std::process::exit(1);
        }
    };

    info!(
        rpc_url = %config.rpc_url,
        registry = %config.registry_address,
        "collaborators initialized"
    );

    let settings = WorkflowSettings {
        record: sample_training_record(),
        encryption_seed: config.encryption_seed.clone(),
        data_file_name: config.data_file_name.clone(),
        min_reward: config.min_reward,
        proof_request_path: config.proof_request_path.clone(),
    };

    match run_workflow(settings, &chain, &storage, &node).await {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                error!(error = %e, "report serialization failed");
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!(error = %e, "workflow failed");
            std::process::exit(1);
        }
    }
}

fn sample_training_record() -> TrainingRecord {
    TrainingRecord {
        timestamp: Utc::now().to_rfc3339(),
        data_type: "training_data".to_string(),
        content: RecordContent {
            user_preferences: UserPreferences {
                language: "en".to_string(),
                region: "US".to_string(),
                interests: vec![
                    "AI".to_string(),
                    "blockchain".to_string(),
                    "privacy".to_string(),
                ],
            },
            behavioral_data: BehavioralData {
                session_duration_secs: 45,
                interaction_count: 12,
                feature_usage: vec![
                    "search".to_string(),
                    "recommendations".to_string(),
                    "analytics".to_string(),
                ],
            },
            personal_metrics: PersonalMetrics {
                age: 28,
                profession: "software_engineer".to_string(),
                experience: "intermediate".to_string(),
            },
        },
        metadata: RecordMetadata {
            version: "1.0".to_string(),
            source: "marketplace_contribution".to_string(),
            encryption_method: "AES-256-GCM".to_string(),
        },
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
