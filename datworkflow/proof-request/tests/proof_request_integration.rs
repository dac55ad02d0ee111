use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chain_client::client::{DataRegistryClient, Job, NodeInfo};
use chain_client::errors::ChainError;
use proof_request::errors::ProofRequestError;
use proof_request::handler::{most_recent_job, process_proof_request, wrap_encryption_key};
use proof_request::models::{ProofRequest, ProofRequestInput, SubmissionStatus};
use proof_request::node::ProofNode;
use rand::rngs::OsRng;
use rsa::pkcs1::{EncodeRsaPublicKey, LineEnding};
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey};

struct ScriptedRegistry {
    job_ids: Vec<u64>,
    jobs: HashMap<u64, String>,
    nodes: HashMap<String, NodeInfo>,
    proof_requests: AtomicUsize,
}

impl ScriptedRegistry {
    fn single_node(job_ids: Vec<u64>, public_key_pem: &str) -> Self {
        let mut jobs = HashMap::new();
        let mut nodes = HashMap::new();
        for job_id in &job_ids {
            let address = format!("0x{:040x}", job_id);
            jobs.insert(*job_id, address.clone());
            nodes.insert(
                address,
                NodeInfo {
                    url: format!("https://node-{job_id}.example"),
                    public_key: public_key_pem.to_string(),
                },
            );
        }
        Self {
            job_ids,
            jobs,
            nodes,
            proof_requests: AtomicUsize::new(0),
        }
    }
}

fn not_exercised<T>() -> Result<T, ChainError> {
    Err(ChainError::Contract("not exercised in this test".to_string()))
}

#[async_trait]
impl DataRegistryClient for ScriptedRegistry {
    async fn file_id_by_url(&self, _url: &str) -> Result<u64, ChainError> {
        not_exercised()
    }

    async fn add_file(&self, _url: &str) -> Result<u64, ChainError> {
        not_exercised()
    }

    async fn request_proof(&self, _file_id: u64, _min_reward: u64) -> Result<(), ChainError> {
        self.proof_requests.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn file_job_ids(&self, _file_id: u64) -> Result<Vec<u64>, ChainError> {
        Ok(self.job_ids.clone())
    }

    async fn job(&self, job_id: u64) -> Result<Job, ChainError> {
        let node_address = self
            .jobs
            .get(&job_id)
            .cloned()
            .ok_or_else(|| ChainError::Contract(format!("unknown job {job_id}")))?;
        Ok(Job {
            job_id,
            node_address,
        })
    }

    async fn node(&self, node_address: &str) -> Result<NodeInfo, ChainError> {
        self.nodes
            .get(node_address)
            .cloned()
            .ok_or_else(|| ChainError::Contract(format!("unknown node {node_address}")))
    }

    async fn request_reward(&self, _file_id: u64) -> Result<(), ChainError> {
        not_exercised()
    }

    async fn sign_seed(&self, _seed: &str) -> Result<String, ChainError> {
        not_exercised()
    }
}

struct ScriptedNode {
    status: u16,
    submissions: Mutex<Vec<(String, ProofRequest)>>,
}

impl ScriptedNode {
    fn new(status: u16) -> Self {
        Self {
            status,
            submissions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ProofNode for ScriptedNode {
    async fn submit(
        &self,
        node_url: &str,
        request: &ProofRequest,
    ) -> Result<SubmissionStatus, ProofRequestError> {
        self.submissions
            .lock()
            .unwrap()
            .push((node_url.to_string(), request.clone()));
        if self.status == 200 {
            Ok(SubmissionStatus::Accepted)
        } else {
            Ok(SubmissionStatus::Rejected {
                status: self.status,
            })
        }
    }
}

struct UnreachableNode;

#[async_trait]
impl ProofNode for UnreachableNode {
    async fn submit(
        &self,
        _node_url: &str,
        _request: &ProofRequest,
    ) -> Result<SubmissionStatus, ProofRequestError> {
        Err(ProofRequestError::Submit("connection refused".to_string()))
    }
}

fn node_keypair() -> (RsaPrivateKey, String) {
    let private_key = RsaPrivateKey::new(&mut OsRng, 2048).expect("keygen");
    let public_pem = private_key
        .to_public_key()
        .to_pkcs1_pem(LineEnding::LF)
        .expect("pem encode")
        .to_string();
    (private_key, public_pem)
}

fn input_template(artifact_path: PathBuf) -> ProofRequestInput {
    ProofRequestInput {
        file_id: 42,
        file_url: "ipfs://abc".to_string(),
        password: "0xsigned-password".to_string(),
        encryption_seed: "contribution-seed-v1".to_string(),
        min_reward: 100,
        artifact_path,
    }
}

#[tokio::test]
async fn no_jobs_fails_fast() {
    let (_, pem) = node_keypair();
    let registry = ScriptedRegistry::single_node(vec![], &pem);
    let node = ScriptedNode::new(200);
    let dir = tempfile::tempdir().unwrap();

    let err = process_proof_request(
        &registry,
        &node,
        input_template(dir.path().join("proof_request.json")),
    )
    .await
    .expect_err("must fail");

    assert!(matches!(err, ProofRequestError::NoJobsForFile { file_id: 42 }));
    assert!(node.submissions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn selects_single_job() {
    let (_, pem) = node_keypair();
    let registry = ScriptedRegistry::single_node(vec![7], &pem);
    let node = ScriptedNode::new(200);
    let dir = tempfile::tempdir().unwrap();

    let report = process_proof_request(
        &registry,
        &node,
        input_template(dir.path().join("proof_request.json")),
    )
    .await
    .expect("must succeed");

    assert_eq!(report.job_id, 7);
    assert_eq!(report.node_url, "https://node-7.example");
    assert_eq!(registry.proof_requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn selects_most_recently_created_of_many_jobs() {
    let (_, pem) = node_keypair();
    let registry = ScriptedRegistry::single_node(vec![3, 7, 9], &pem);
    let node = ScriptedNode::new(200);
    let dir = tempfile::tempdir().unwrap();

    let report = process_proof_request(
        &registry,
        &node,
        input_template(dir.path().join("proof_request.json")),
    )
    .await
    .expect("must succeed");

    assert_eq!(report.job_id, 9);
    let submissions = node.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].0, "https://node-9.example");
    assert_eq!(submissions[0].1.job_id, 9);
    assert_eq!(submissions[0].1.file_id, 42);
}

#[tokio::test]
async fn wrapped_key_is_hex_and_unwraps_to_password() {
    let (private_key, pem) = node_keypair();
    let registry = ScriptedRegistry::single_node(vec![7], &pem);
    let node = ScriptedNode::new(200);
    let dir = tempfile::tempdir().unwrap();

    let input = input_template(dir.path().join("proof_request.json"));
    let password = input.password.clone();
    let report = process_proof_request(&registry, &node, input)
        .await
        .expect("must succeed");

    // Wrapping must actually transform the value.
    assert_ne!(report.request.encryption_key, password);
    let wrapped = hex::decode(&report.request.encryption_key).expect("must be valid hex");

    let recovered = private_key
        .decrypt(Pkcs1v15Encrypt, &wrapped)
        .expect("node must be able to unwrap");
    assert_eq!(recovered, password.as_bytes());
}

#[tokio::test]
async fn artifact_is_persisted_even_when_node_rejects() {
    let (_, pem) = node_keypair();
    let registry = ScriptedRegistry::single_node(vec![7], &pem);
    let node = ScriptedNode::new(500);
    let dir = tempfile::tempdir().unwrap();
    let artifact_path = dir.path().join("proof_request.json");

    let report = process_proof_request(&registry, &node, input_template(artifact_path.clone()))
        .await
        .expect("rejection is non-fatal");

    assert_eq!(report.submission, SubmissionStatus::Rejected { status: 500 });

    let raw = std::fs::read_to_string(&artifact_path).expect("artifact must exist");
    let persisted: ProofRequest = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, report.request);

    // Reserved fields serialize as null, not as absent keys.
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value["nonce"].is_null());
    assert!(value["proof_url"].is_null());
}

#[tokio::test]
async fn transport_failure_is_nonfatal() {
    let (_, pem) = node_keypair();
    let registry = ScriptedRegistry::single_node(vec![7], &pem);
    let dir = tempfile::tempdir().unwrap();
    let artifact_path = dir.path().join("proof_request.json");

    let report = process_proof_request(&registry, &UnreachableNode, input_template(artifact_path.clone()))
        .await
        .expect("transport failure is non-fatal");

    assert!(matches!(report.submission, SubmissionStatus::Failed { .. }));
    assert!(artifact_path.exists());
}

#[tokio::test]
async fn rejects_unregistered_file_id() {
    let (_, pem) = node_keypair();
    let registry = ScriptedRegistry::single_node(vec![7], &pem);
    let node = ScriptedNode::new(200);
    let dir = tempfile::tempdir().unwrap();

    let mut input = input_template(dir.path().join("proof_request.json"));
    input.file_id = 0;

    let err = process_proof_request(&registry, &node, input)
        .await
        .expect_err("must fail");
    assert!(matches!(err, ProofRequestError::InvalidRequest(_)));
    assert_eq!(registry.proof_requests.load(Ordering::SeqCst), 0);
}

#[test]
fn most_recent_job_policy() {
    assert_eq!(most_recent_job(&[]), None);
    assert_eq!(most_recent_job(&[7]), Some(7));
    // Creation order wins, not numeric order.
    assert_eq!(most_recent_job(&[9, 3, 7]), Some(7));
}

#[test]
fn garbage_public_key_is_a_wrap_error() {
    let err = wrap_encryption_key("not a pem", "password").expect_err("must fail");
    assert!(matches!(err, ProofRequestError::KeyWrap(_)));
}
