use thiserror::Error;
use tracing::debug;

use maas_models::{AddressSpace, AddressSpaceStatus};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request failed with status: {0}")]
    Status(reqwest::StatusCode),
}

/// Client for the address-space API: observes the desired state and
/// reports provisioning status back.
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

    pub async fn report_status(
        &self,
        space: &str,
        status: &AddressSpaceStatus,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .put(format!(
                "{}/api/v1/addressspaces/{}/status",
                self.base_url, space
            ))
            .json(status)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        Ok(())
    }
}
