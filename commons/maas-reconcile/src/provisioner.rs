use std::collections::BTreeSet;

use async_trait::async_trait;
use thiserror::Error;

use crate::entity::AttributeBag;

/// A create/delete call against the downstream system failed. Recovered
/// within the pass: the reconciler records the failure for that name and
/// keeps processing the remaining names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProvisionError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("pass deadline exceeded before the operation was issued")]
    DeadlineExceeded,

    #[error("internal error: {0}")]
    Internal(String),
}

/// Contract of the downstream provisioning system.
///
/// Implementations front the external system of record (an identity
/// provider's realm API, a cluster resource API). The reconciler only
/// depends on this contract, never on a concrete implementation; tests
/// inject in-memory implementations that own their own state.
#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Authoritative enumeration of what currently exists downstream.
    /// Consulted at bootstrap and on explicit resync only.
    async fn list_names(&self) -> Result<BTreeSet<String>, ProvisionError>;

    async fn create(
        &self,
        name: &str,
        attributes: &AttributeBag,
    ) -> Result<(), ProvisionError>;

    async fn delete(&self, name: &str) -> Result<(), ProvisionError>;
}
