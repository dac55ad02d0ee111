use chain_client::client::{DataRegistryClient, UNREGISTERED_FILE_ID};
use tracing::info;

use crate::errors::BindError;
use crate::models::RegistryBindResponse;

/// Resolves the on-chain file id for a storage URL, registering it if the
/// registry has never seen it. Idempotent: repeated calls with the same URL
/// return the same id and never register twice.
pub async fn bind_file_url(
    chain: &dyn DataRegistryClient,
    url: &str,
) -> Result<RegistryBindResponse, BindError> {
    if url.trim().is_empty() {
        return Err(BindError::InvalidRequest("url cannot be empty".to_string()));
    }

    let existing = chain.file_id_by_url(url).await.map_err(BindError::Lookup)?;
    if existing != UNREGISTERED_FILE_ID {
        return Ok(RegistryBindResponse {
            file_id: existing,
            newly_registered: false,
        });
    }

    let minted = chain.add_file(url).await.map_err(BindError::Register)?;
    if minted == UNREGISTERED_FILE_ID {
        return Err(BindError::RegistrationIncomplete {
            url: url.to_string(),
        });
    }

    info!(file_id = minted, "registered file url on chain");
    Ok(RegistryBindResponse {
        file_id: minted,
        newly_registered: true,
    })
}
