use std::env;
use std::path::PathBuf;

const DEFAULT_ENCRYPTION_SEED: &str = "dat-contribution-encryption-seed-v1";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub private_key: String,
    pub ipfs_jwt: Option<String>,
    pub rpc_url: String,
    pub chain_id: u64,
    pub registry_address: String,
    pub min_reward: u64,
    pub encryption_seed: String,
    pub data_file_name: String,
    pub proof_request_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        load_dotenv_layers();
        Ok(Self {
            private_key: ensure_hex_prefix(read_var("PRIVATE_KEY")?),
            ipfs_jwt: env::var("IPFS_JWT").ok().filter(|v| !v.trim().is_empty()),
            rpc_url: read_var("RPC_URL")?,
            chain_id: read_optional_u64("CHAIN_ID", 11155111)?,
            registry_address: read_var("DATA_REGISTRY_ADDRESS")?,
            min_reward: read_optional_u64("MIN_REWARD", 100)?,
            encryption_seed: read_optional_string("ENCRYPTION_SEED", DEFAULT_ENCRYPTION_SEED),
            data_file_name: read_optional_string("DATA_FILE_NAME", "encrypted_training_data.json"),
            proof_request_path: PathBuf::from(read_optional_string(
                "PROOF_REQUEST_PATH",
                "proof_request.json",
            )),
        })
    }
}

pub fn ensure_hex_prefix(key: String) -> String {
    if key.starts_with("0x") {
        key
    } else {
        format!("0x{key}")
    }
}

fn read_var(key: &str) -> Result<String, String> {
    env::var(key).map_err(|_| format!("missing required env var: {key}"))
}

fn read_optional_u64(key: &str, default: u64) -> Result<u64, String> {
    match env::var(key) {
        Ok(v) => v.parse::<u64>().map_err(|e| format!("invalid {key}: {e}")),
        Err(_) => Ok(default),
    }
}

fn read_optional_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn load_dotenv_layers() {
    for path in [".env", "../.env"] {
        let _ = dotenvy::from_path_override(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_prefix_is_added_once() {
        assert_eq!(ensure_hex_prefix("abc123".to_string()), "0xabc123");
        assert_eq!(ensure_hex_prefix("0xabc123".to_string()), "0xabc123");
    }
}
