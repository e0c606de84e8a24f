use thiserror::Error;
use tracing::debug;

use maas_models::AddressSpace;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request failed with status: {0}")]
    Status(reqwest::StatusCode),
}

/// Read-only client for the address-space API; the controller only ever
/// observes the desired state, it never mutates it.
pub struct AddressSpaceClient {
    base_url: String,
    http: reqwest::Client,
}

impl AddressSpaceClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn list_address_spaces(
        &self,
    ) -> Result<Vec<AddressSpace>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/v1/addressspaces", self.base_url))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        let spaces: Vec<AddressSpace> = response.json().await?;
        debug!(count = spaces.len(), "listed address spaces");
        Ok(spaces)
    }
}
