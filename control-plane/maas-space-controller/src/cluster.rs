use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use maas_reconcile::ProvisionError;

#[derive(Error, Debug, Clone)]
pub enum ClusterError {
    #[error("cluster request failed: {0}")]
    Request(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<ClusterError> for ProvisionError {
    fn from(err: ClusterError) -> Self {
        match err {
            ClusterError::Request(msg) => ProvisionError::Network(msg),
            ClusterError::Unauthorized(msg) => {
                ProvisionError::Unauthorized(msg)
            }
            ClusterError::Conflict(msg) => ProvisionError::Conflict(msg),
        }
    }
}

/// One rendered infrastructure manifest. A platform-owned shape, not the
/// orchestrator's resource model: the gateway behind [`ClusterApi`]
/// translates it.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct InfraResource {
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    pub spec: serde_json::Value,
}

/// Owner-scoped resource operations against the orchestration cluster.
/// Interface-only: resource CRUD, template expansion on the cluster side
/// and readiness polling all live behind this boundary.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Names of owners (address spaces) that currently have provisioned
    /// resources, derived from the owner label.
    async fn list_owned(&self) -> Result<BTreeSet<String>, ClusterError>;

    /// Apply the full resource list for one owner.
    async fn apply(
        &self,
        owner: &str,
        resources: &[InfraResource],
    ) -> Result<(), ClusterError>;

    /// Delete every resource carrying the owner label.
    async fn delete_owned(&self, owner: &str) -> Result<(), ClusterError>;
}

/// Thin REST adapter for a cluster resource gateway.
pub struct HttpClusterApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpClusterApi {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn check(
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<reqwest::Response, ClusterError> {
        let response =
            response.map_err(|e| ClusterError::Request(e.to_string()))?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ClusterError::Unauthorized(status.to_string()));
        }
        if status == reqwest::StatusCode::CONFLICT {
            return Err(ClusterError::Conflict(status.to_string()));
        }
        if !status.is_success() {
            return Err(ClusterError::Request(format!(
                "unexpected status {status}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl ClusterApi for HttpClusterApi {
    async fn list_owned(&self) -> Result<BTreeSet<String>, ClusterError> {
        let response = self
            .http
            .get(format!("{}/v1/owners", self.base_url))
            .send()
            .await;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ClusterError::Request(e.to_string()))
    }

    async fn apply(
        &self,
        owner: &str,
        resources: &[InfraResource],
    ) -> Result<(), ClusterError> {
        let response = self
            .http
            .put(format!("{}/v1/owners/{}/resources", self.base_url, owner))
            .json(resources)
            .send()
            .await;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_owned(&self, owner: &str) -> Result<(), ClusterError> {
        let response = self
            .http
            .delete(format!(
                "{}/v1/owners/{}/resources",
                self.base_url, owner
            ))
            .send()
            .await;
        Self::check(response).await?;
        Ok(())
    }
}
