//! Set reconciliation for downstream provisioning systems.
//!
//! Given a periodically observed desired set of named entities and an
//! external system that can create and delete them, [`SetReconciler`]
//! computes and applies the minimal diff on every pass: create what is
//! missing, delete what is extra, and replace (delete then create) entities
//! whose defining attributes drifted. Passes are idempotent and tolerate
//! partial failure; the tracked baseline is seeded from the downstream
//! system on the first pass, so a restarted process converges instead of
//! re-provisioning blindly.

pub mod entity;
pub mod error;
pub mod provisioner;
pub mod reconciler;

pub use entity::{AttributeBag, DesiredEntity};
pub use error::{
    FailedOp, OpKind, ReconcileError, ReconciliationFailure,
};
pub use provisioner::{ProvisionError, Provisioner};
pub use reconciler::{PassSummary, ReconcilerOptions, SetReconciler};
