use thiserror::Error;

use crate::provisioner::ProvisionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    Create,
    Delete,
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpKind::Create => write!(f, "create"),
            OpKind::Delete => write!(f, "delete"),
        }
    }
}

/// A single provisioning operation that failed within a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedOp {
    pub name: String,
    pub op: OpKind,
    pub error: ProvisionError,
}

/// Aggregate of every operation that failed in one reconciliation pass.
/// Successfully applied changes from the same pass are kept; the driver
/// decides whether to re-run the pass on its next cycle.
#[derive(Error, Debug, Clone)]
#[error("reconciliation pass failed for {} operation(s)", failures.len())]
pub struct ReconciliationFailure {
    pub failures: Vec<FailedOp>,
}

impl ReconciliationFailure {
    /// Names with at least one failed operation, deduplicated in order.
    pub fn names(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for f in &self.failures {
            if !out.contains(&f.name.as_str()) {
                out.push(&f.name);
            }
        }
        out
    }
}

#[derive(Error, Debug)]
pub enum ReconcileError {
    /// The desired set named the same entity twice. Rejected before any
    /// provisioner call is issued.
    #[error("duplicate entity name in desired set: {0}")]
    DuplicateName(String),

    /// The bootstrap enumeration of the downstream system failed; nothing
    /// was reconciled and the next pass retries the bootstrap.
    #[error("bootstrap enumeration failed: {0}")]
    Bootstrap(#[source] ProvisionError),

    #[error(transparent)]
    Failed(#[from] ReconciliationFailure),
}
