use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use ethers::contract::{abigen, ContractCall};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, U256, U64};

use crate::client::{DataRegistryClient, Job, NodeInfo};
use crate::errors::ChainError;

abigen!(
    DataRegistry,
    r#"[
        {
            "inputs": [{"internalType":"string","name":"url","type":"string"}],
            "name": "getFileIdByUrl",
            "outputs": [{"internalType":"uint256","name":"fileId","type":"uint256"}],
            "stateMutability": "view",
            "type": "function"
        },
        {
            "inputs": [{"internalType":"string","name":"url","type":"string"}],
            "name": "addFile",
            "outputs": [],
            "stateMutability": "nonpayable",
            "type": "function"
        },
        {
            "inputs": [
                {"internalType":"uint256","name":"fileId","type":"uint256"},
                {"internalType":"uint256","name":"minReward","type":"uint256"}
            ],
            "name": "requestProof",
            "outputs": [],
            "stateMutability": "nonpayable",
            "type": "function"
        },
        {
            "inputs": [{"internalType":"uint256","name":"fileId","type":"uint256"}],
            "name": "fileJobIds",
            "outputs": [{"internalType":"uint256[]","name":"jobIds","type":"uint256[]"}],
            "stateMutability": "view",
            "type": "function"
        },
        {
            "inputs": [{"internalType":"uint256","name":"jobId","type":"uint256"}],
            "name": "getJob",
            "outputs": [{"internalType":"address","name":"nodeAddress","type":"address"}],
            "stateMutability": "view",
            "type": "function"
        },
        {
            "inputs": [{"internalType":"address","name":"nodeAddress","type":"address"}],
            "name": "getNode",
            "outputs": [
                {"internalType":"string","name":"url","type":"string"},
                {"internalType":"string","name":"publicKey","type":"string"}
            ],
            "stateMutability": "view",
            "type": "function"
        },
        {
            "inputs": [{"internalType":"uint256","name":"fileId","type":"uint256"}],
            "name": "requestReward",
            "outputs": [],
            "stateMutability": "nonpayable",
            "type": "function"
        }
    ]"#
);

type RegistryMiddleware = SignerMiddleware<Provider<Http>, LocalWallet>;

pub struct ChainConfig {
    pub rpc_url: String,
    pub private_key: String,
    pub chain_id: u64,
    pub registry_address: String,
}

pub struct EvmRegistryClient {
    contract: DataRegistry<RegistryMiddleware>,
    wallet: LocalWallet,
}

impl EvmRegistryClient {
    pub fn connect(cfg: ChainConfig) -> Result<Self, ChainError> {
        let provider = Provider::<Http>::try_from(cfg.rpc_url.as_str())
            .map_err(|e| ChainError::Provider(format!("provider init failed: {e}")))?;

        let wallet: LocalWallet = cfg
            .private_key
            .parse::<LocalWallet>()
            .map_err(|e| ChainError::Wallet(format!("invalid private key: {e}")))?
            .with_chain_id(cfg.chain_id);

        let registry_addr = Address::from_str(&cfg.registry_address)
            .map_err(|e| ChainError::Contract(format!("invalid registry address: {e}")))?;

        let middleware = Arc::new(SignerMiddleware::new(provider, wallet.clone()));

        Ok(Self {
            contract: DataRegistry::new(registry_addr, middleware),
            wallet,
        })
    }
}

#[async_trait]
impl DataRegistryClient for EvmRegistryClient {
    async fn file_id_by_url(&self, url: &str) -> Result<u64, ChainError> {
        let raw = self
            .contract
            .get_file_id_by_url(url.to_string())
            .call()
            .await
            .map_err(|e| ChainError::Contract(format!("getFileIdByUrl call failed: {e}")))?;
        checked_u64(raw, "file id")
    }

    async fn add_file(&self, url: &str) -> Result<u64, ChainError> {
        send_and_confirm(self.contract.add_file(url.to_string()), "addFile").await?;

        // Contract writes return nothing usable off-chain; read the minted id
        // back once the registration is confirmed.
        let minted = self
            .contract
            .get_file_id_by_url(url.to_string())
            .call()
            .await
            .map_err(|e| ChainError::Contract(format!("minted id lookup failed: {e}")))?;
        checked_u64(minted, "file id")
    }

    async fn request_proof(&self, file_id: u64, min_reward: u64) -> Result<(), ChainError> {
        let call = self
            .contract
            .request_proof(U256::from(file_id), U256::from(min_reward));
        send_and_confirm(call, "requestProof").await
    }

    async fn file_job_ids(&self, file_id: u64) -> Result<Vec<u64>, ChainError> {
        let raw = self
            .contract
            .file_job_ids(U256::from(file_id))
            .call()
            .await
            .map_err(|e| ChainError::Contract(format!("fileJobIds call failed: {e}")))?;
        raw.into_iter().map(|id| checked_u64(id, "job id")).collect()
    }

    async fn job(&self, job_id: u64) -> Result<Job, ChainError> {
        let node_address = self
            .contract
            .get_job(U256::from(job_id))
            .call()
            .await
            .map_err(|e| ChainError::Contract(format!("getJob call failed: {e}")))?;

        Ok(Job {
            job_id,
            node_address: format!("0x{}", hex::encode(node_address.as_bytes())),
        })
    }

    async fn node(&self, node_address: &str) -> Result<NodeInfo, ChainError> {
        let addr = Address::from_str(node_address).map_err(|e| {
            ChainError::Contract(format!("invalid node address `{node_address}`: {e}"))
        })?;

        let (url, public_key) = self
            .contract
            .get_node(addr)
            .call()
            .await
            .map_err(|e| ChainError::Contract(format!("getNode call failed: {e}")))?;

        Ok(NodeInfo { url, public_key })
    }

    async fn request_reward(&self, file_id: u64) -> Result<(), ChainError> {
        send_and_confirm(self.contract.request_reward(U256::from(file_id)), "requestReward").await
    }

    async fn sign_seed(&self, seed: &str) -> Result<String, ChainError> {
        let signature = self
            .wallet
            .sign_message(seed.as_bytes())
            .await
            .map_err(|e| ChainError::Signing(format!("seed signing failed: {e}")))?;
        Ok(format!("0x{signature}"))
    }
}

async fn send_and_confirm(
    call: ContractCall<RegistryMiddleware, ()>,
    what: &str,
) -> Result<(), ChainError> {
    let pending = call
        .send()
        .await
        .map_err(|e| ChainError::Contract(format!("{what} call failed: {e}")))?;

    let tx_hash = pending.tx_hash();
    let receipt = pending
        .await
        .map_err(|e| ChainError::Contract(format!("{what} confirmation failed: {e}")))?
        .ok_or_else(|| ChainError::Contract(format!("{what}: missing transaction receipt")))?;

    if receipt.status != Some(U64::from(1u64)) {
        return Err(ChainError::TxReverted {
            what: what.to_string(),
            tx_hash: format!("{tx_hash:#x}"),
        });
    }
    Ok(())
}

fn checked_u64(value: U256, what: &str) -> Result<u64, ChainError> {
    if value.bits() > 64 {
        return Err(ChainError::ValueOutOfRange(format!(
            "{what} does not fit in u64: {value}"
        )));
    }
    Ok(value.as_u64())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> EvmRegistryClient {
        EvmRegistryClient::connect(ChainConfig {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            private_key: "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
                .to_string(),
            chain_id: 31337,
            registry_address: "0x3e3a14f46d13e156daa99bf234224a57b1c79da5".to_string(),
        })
        .expect("client should build without touching the network")
    }

    #[test]
    fn checked_u64_accepts_small_values() {
        assert_eq!(checked_u64(U256::from(7u64), "file id").unwrap(), 7);
        assert_eq!(checked_u64(U256::from(u64::MAX), "file id").unwrap(), u64::MAX);
    }

    #[test]
    fn checked_u64_rejects_overflow() {
        let too_big = U256::from(u64::MAX) + U256::from(1u64);
        let err = checked_u64(too_big, "job id").expect_err("must not truncate");
        assert!(matches!(err, ChainError::ValueOutOfRange(_)));
    }

    #[tokio::test]
    async fn sign_seed_yields_prefixed_hex_signature() {
        let client = test_client();
        let password = client.sign_seed("contribution-seed").await.unwrap();

        assert!(password.starts_with("0x"));
        // 65-byte recoverable signature renders as 130 hex chars.
        assert_eq!(password.len(), 2 + 130);
        assert!(hex::decode(&password[2..]).is_ok());
    }

    #[tokio::test]
    async fn sign_seed_is_deterministic_per_seed() {
        let client = test_client();
        let first = client.sign_seed("seed-a").await.unwrap();
        let second = client.sign_seed("seed-a").await.unwrap();
        let other = client.sign_seed("seed-b").await.unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
    }
}
