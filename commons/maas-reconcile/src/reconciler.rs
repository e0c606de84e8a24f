use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::entity::{AttributeBag, DesiredEntity};
use crate::error::{
    FailedOp, OpKind, ReconcileError, ReconciliationFailure,
};
use crate::provisioner::{ProvisionError, Provisioner};

/// Predicate gating whether a desired entity should be provisioned at all.
/// Entities failing the predicate are excluded from the desired set before
/// the diff, so a currently provisioned entity that stops matching is
/// deleted on the next pass.
pub type GatePredicate = Arc<dyn Fn(&DesiredEntity) -> bool + Send + Sync>;

#[derive(Clone, Default)]
pub struct ReconcilerOptions {
    gate: Option<GatePredicate>,
    pass_deadline: Option<Duration>,
}

impl ReconcilerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&DesiredEntity) -> bool + Send + Sync + 'static,
    {
        self.gate = Some(Arc::new(predicate));
        self
    }

    /// Wall-clock budget for a single pass. Operations not yet issued when
    /// the budget runs out are reported as failed with
    /// [`ProvisionError::DeadlineExceeded`]; in-flight calls are not
    /// revoked.
    pub fn pass_deadline(mut self, deadline: Duration) -> Self {
        self.pass_deadline = Some(deadline);
        self
    }
}

/// Counts of what one reconciliation pass applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub created: usize,
    pub deleted: usize,
    pub replaced: usize,
    pub unchanged: usize,
}

#[derive(Default)]
struct Tracked {
    bootstrapped: bool,
    /// Name -> defining attributes as last applied. `None` marks an entity
    /// adopted from the bootstrap enumeration whose downstream attributes
    /// are unknown; it is adopted, not replaced, on first sight.
    provisioned: BTreeMap<String, Option<AttributeBag>>,
}

enum PlannedOp<'a> {
    Delete {
        name: String,
        replacement: bool,
    },
    Create {
        entity: &'a DesiredEntity,
        replacement: bool,
    },
}

/// Brings a downstream provisioning system into agreement with a desired
/// set of named entities on every [`SetReconciler::on_update`] call.
///
/// The tracked baseline and the pass form one critical section: passes are
/// serialized behind a lock, so at most one executes at a time even if the
/// driver misbehaves. The reconciler persists nothing across process
/// restarts; the first pass seeds its baseline from the provisioner's
/// authoritative enumeration.
pub struct SetReconciler<P> {
    provisioner: P,
    options: ReconcilerOptions,
    tracked: Mutex<Tracked>,
}

impl<P: Provisioner> SetReconciler<P> {
    pub fn new(provisioner: P, options: ReconcilerOptions) -> Self {
        Self {
            provisioner,
            options,
            tracked: Mutex::new(Tracked::default()),
        }
    }

    /// Reconcile the downstream system against `desired`, the complete
    /// current desired set (not a delta).
    ///
    /// A second call with an unchanged set issues zero provisioner calls.
    /// Failed operations do not stop the pass; they are aggregated into
    /// [`ReconcileError::Failed`] while applied changes are kept.
    #[instrument(skip_all, fields(desired = desired.len()))]
    pub async fn on_update(
        &self,
        desired: &[DesiredEntity],
    ) -> Result<PassSummary, ReconcileError> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for entity in desired {
            if !seen.insert(entity.name.as_str()) {
                return Err(ReconcileError::DuplicateName(
                    entity.name.clone(),
                ));
            }
        }

        let gated: BTreeMap<&str, &DesiredEntity> = desired
            .iter()
            .filter(|e| match &self.options.gate {
                Some(gate) => gate(e),
                None => true,
            })
            .map(|e| (e.name.as_str(), e))
            .collect();

        let mut tracked = self.tracked.lock().await;

        if !tracked.bootstrapped {
            let names = self
                .provisioner
                .list_names()
                .await
                .map_err(ReconcileError::Bootstrap)?;
            info!(
                count = names.len(),
                "seeded baseline from downstream enumeration"
            );
            tracked.provisioned =
                names.into_iter().map(|n| (n, None)).collect();
            tracked.bootstrapped = true;
        }

        let mut summary = PassSummary::default();
        let mut plan: Vec<PlannedOp> = Vec::new();
        let mut creates: Vec<PlannedOp> = Vec::new();
        let mut adopted: Vec<(String, AttributeBag)> = Vec::new();

        for (name, known) in tracked.provisioned.iter() {
            if !gated.contains_key(name.as_str()) {
                plan.push(PlannedOp::Delete {
                    name: name.clone(),
                    replacement: false,
                });
                continue;
            }
            let entity = gated[name.as_str()];
            match known {
                // Adopted at bootstrap: attributes unknown downstream, so
                // the desired attributes become the baseline without a
                // replacement.
                None => {
                    adopted
                        .push((name.clone(), entity.attributes.clone()));
                    summary.unchanged += 1;
                }
                Some(attrs) if *attrs != entity.attributes => {
                    debug!(%name, "defining attributes drifted; replacing");
                    plan.push(PlannedOp::Delete {
                        name: name.clone(),
                        replacement: true,
                    });
                    creates.push(PlannedOp::Create {
                        entity,
                        replacement: true,
                    });
                }
                Some(_) => summary.unchanged += 1,
            }
        }
        for (&name, &entity) in gated.iter() {
            if !tracked.provisioned.contains_key(name) {
                creates.push(PlannedOp::Create {
                    entity,
                    replacement: false,
                });
            }
        }
        // All deletes run before all creates; within a replaced name the
        // delete therefore always precedes the create.
        plan.extend(creates);

        for (name, attrs) in adopted {
            tracked.provisioned.insert(name, Some(attrs));
        }

        let deadline =
            self.options.pass_deadline.map(|d| Instant::now() + d);
        let mut failures: Vec<FailedOp> = Vec::new();
        let mut failed_deletes: BTreeSet<String> = BTreeSet::new();

        let mut ops = plan.into_iter();
        while let Some(op) = ops.next() {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                warn!("pass deadline exceeded; aborting remaining operations");
                failures.push(aborted(&op));
                for rest in ops {
                    failures.push(aborted(&rest));
                }
                break;
            }
            match op {
                PlannedOp::Delete { name, replacement } => {
                    match self.provisioner.delete(&name).await {
                        Ok(()) => {
                            debug!(%name, replacement, "deleted");
                            tracked.provisioned.remove(&name);
                            if !replacement {
                                summary.deleted += 1;
                            }
                        }
                        Err(error) => {
                            warn!(%name, %error, "delete failed");
                            failed_deletes.insert(name.clone());
                            failures.push(FailedOp {
                                name,
                                op: OpKind::Delete,
                                error,
                            });
                        }
                    }
                }
                PlannedOp::Create {
                    entity,
                    replacement,
                } => {
                    if replacement && failed_deletes.contains(&entity.name)
                    {
                        // The stale entity is still downstream; creating
                        // now would double it. The delete failure is
                        // already reported for this name.
                        debug!(name = %entity.name, "skipping create after failed replacement delete");
                        continue;
                    }
                    match self
                        .provisioner
                        .create(&entity.name, &entity.attributes)
                        .await
                    {
                        Ok(()) => {
                            debug!(name = %entity.name, replacement, "created");
                            tracked.provisioned.insert(
                                entity.name.clone(),
                                Some(entity.attributes.clone()),
                            );
                            if replacement {
                                summary.replaced += 1;
                            } else {
                                summary.created += 1;
                            }
                        }
                        Err(error) => {
                            warn!(name = %entity.name, %error, "create failed");
                            failures.push(FailedOp {
                                name: entity.name.clone(),
                                op: OpKind::Create,
                                error,
                            });
                        }
                    }
                }
            }
        }

        info!(
            created = summary.created,
            deleted = summary.deleted,
            replaced = summary.replaced,
            unchanged = summary.unchanged,
            failed = failures.len(),
            "reconciliation pass complete"
        );

        if failures.is_empty() {
            Ok(summary)
        } else {
            Err(ReconciliationFailure { failures }.into())
        }
    }

    /// Drop the baseline so the next pass re-seeds it from the
    /// provisioner's authoritative enumeration.
    pub async fn resync(&self) {
        let mut tracked = self.tracked.lock().await;
        tracked.bootstrapped = false;
        tracked.provisioned.clear();
        info!("baseline dropped; next pass will re-enumerate");
    }

    /// Snapshot of the names the reconciler currently believes are
    /// provisioned downstream.
    pub async fn tracked_names(&self) -> BTreeSet<String> {
        let tracked = self.tracked.lock().await;
        tracked.provisioned.keys().cloned().collect()
    }
}

fn aborted(op: &PlannedOp<'_>) -> FailedOp {
    match op {
        PlannedOp::Delete { name, .. } => FailedOp {
            name: name.clone(),
            op: OpKind::Delete,
            error: ProvisionError::DeadlineExceeded,
        },
        PlannedOp::Create { entity, .. } => FailedOp {
            name: entity.name.clone(),
            op: OpKind::Create,
            error: ProvisionError::DeadlineExceeded,
        },
    }
}
