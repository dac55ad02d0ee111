use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RegistryBindResponse {
    pub file_id: u64,
    pub newly_registered: bool,
}
