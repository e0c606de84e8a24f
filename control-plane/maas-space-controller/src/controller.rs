use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use maas_models::AddressSpace;
use maas_reconcile::{
    AttributeBag, DesiredEntity, PassSummary, ProvisionError, Provisioner,
    ReconcileError, ReconcilerOptions, SetReconciler,
};

use crate::cluster::ClusterApi;
use crate::templates::{RenderContext, TemplateManager};

/// Defining attributes of a space's infrastructure. A change to either
/// replaces the whole resource set (delete then recreate); there is no
/// in-place upgrade path.
pub const ATTR_SPACE_TYPE: &str = "type";
pub const ATTR_PLAN: &str = "plan";

type SpaceMap = Arc<RwLock<HashMap<String, AddressSpace>>>;

struct InfraProvisioner {
    cluster: Arc<dyn ClusterApi>,
    templates: TemplateManager,
    spaces: SpaceMap,
}

#[async_trait]
impl Provisioner for InfraProvisioner {
    async fn list_names(&self) -> Result<BTreeSet<String>, ProvisionError> {
        Ok(self.cluster.list_owned().await?)
    }

    async fn create(
        &self,
        name: &str,
        _attributes: &AttributeBag,
    ) -> Result<(), ProvisionError> {
        let space = self
            .spaces
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| {
                ProvisionError::Internal(format!(
                    "no observed address space for '{name}'"
                ))
            })?;
        let resources = self
            .templates
            .render(&RenderContext::from_space(&space))
            .map_err(|e| ProvisionError::Internal(e.to_string()))?;
        info!(
            space = %name,
            resources = resources.len(),
            "applying infrastructure"
        );
        self.cluster.apply(name, &resources).await?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), ProvisionError> {
        info!(space = %name, "deleting infrastructure");
        self.cluster.delete_owned(name).await?;
        Ok(())
    }
}

/// Keeps the cluster's provisioned messaging infrastructure in agreement
/// with the set of address spaces. Every space gets infrastructure; there
/// is no gating attribute here.
pub struct SpaceController {
    reconciler: SetReconciler<InfraProvisioner>,
    spaces: SpaceMap,
}

impl SpaceController {
    pub fn new(
        cluster: Arc<dyn ClusterApi>,
        pass_deadline: Option<Duration>,
    ) -> Self {
        let spaces: SpaceMap = Arc::new(RwLock::new(HashMap::new()));
        let mut options = ReconcilerOptions::new();
        if let Some(deadline) = pass_deadline {
            options = options.pass_deadline(deadline);
        }
        let provisioner = InfraProvisioner {
            cluster,
            templates: TemplateManager::new(),
            spaces: spaces.clone(),
        };
        Self {
            reconciler: SetReconciler::new(provisioner, options),
            spaces,
        }
    }

    /// Reconcile infrastructure against the full, current set of address
    /// spaces.
    pub async fn on_update(
        &self,
        spaces: &[AddressSpace],
    ) -> Result<PassSummary, ReconcileError> {
        let mut observed = HashMap::with_capacity(spaces.len());
        for space in spaces {
            observed.insert(space.name.clone(), space.clone());
        }
        *self.spaces.write().await = observed;

        let desired: Vec<DesiredEntity> = spaces
            .iter()
            .map(|space| {
                DesiredEntity::new(&space.name)
                    .with_attribute(ATTR_SPACE_TYPE, &space.type_name)
                    .with_attribute(ATTR_PLAN, &space.plan)
            })
            .collect();
        self.reconciler.on_update(&desired).await
    }

    /// Space names with infrastructure the controller believes exists.
    pub async fn tracked_spaces(&self) -> BTreeSet<String> {
        self.reconciler.tracked_names().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::MockClusterApi;
    use mockall::predicate::eq;

    fn space(name: &str, plan: &str) -> AddressSpace {
        AddressSpace::builder()
            .name(name)
            .namespace("myns")
            .type_name("standard")
            .plan(plan)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn new_space_gets_its_rendered_resource_list_applied() {
        let mut cluster = MockClusterApi::new();
        cluster
            .expect_list_owned()
            .times(1)
            .returning(|| Ok(BTreeSet::new()));
        cluster
            .expect_apply()
            .with(eq("myspace"), mockall::predicate::function(
                |resources: &[crate::cluster::InfraResource]| {
                    resources.iter().any(|r| r.name == "myspace-router")
                        && resources
                            .iter()
                            .any(|r| r.name == "myspace-broker")
                },
            ))
            .times(1)
            .returning(|_, _| Ok(()));

        let controller = SpaceController::new(Arc::new(cluster), None);
        let summary = controller
            .on_update(&[space("myspace", "plan-small")])
            .await
            .unwrap();
        assert_eq!(summary.created, 1);
    }

    #[tokio::test]
    async fn plan_change_replaces_the_infrastructure() {
        let mut cluster = MockClusterApi::new();
        cluster
            .expect_list_owned()
            .times(1)
            .returning(|| Ok(BTreeSet::new()));
        cluster.expect_apply().times(2).returning(|_, _| Ok(()));
        cluster
            .expect_delete_owned()
            .with(eq("myspace"))
            .times(1)
            .returning(|_| Ok(()));

        let controller = SpaceController::new(Arc::new(cluster), None);
        controller
            .on_update(&[space("myspace", "plan-small")])
            .await
            .unwrap();
        let summary = controller
            .on_update(&[space("myspace", "plan-large")])
            .await
            .unwrap();
        assert_eq!(summary.replaced, 1);
    }

    #[tokio::test]
    async fn removed_space_is_deprovisioned() {
        let mut cluster = MockClusterApi::new();
        cluster
            .expect_list_owned()
            .times(1)
            .returning(|| Ok(BTreeSet::new()));
        cluster.expect_apply().times(2).returning(|_, _| Ok(()));
        cluster
            .expect_delete_owned()
            .with(eq("other"))
            .times(1)
            .returning(|_| Ok(()));

        let controller = SpaceController::new(Arc::new(cluster), None);
        controller
            .on_update(&[
                space("myspace", "plan-small"),
                space("other", "plan-small"),
            ])
            .await
            .unwrap();
        let summary = controller
            .on_update(&[space("myspace", "plan-small")])
            .await
            .unwrap();
        assert_eq!(summary.deleted, 1);
        assert_eq!(
            controller.tracked_spaces().await,
            BTreeSet::from(["myspace".to_string()])
        );
    }

    #[tokio::test]
    async fn preprovisioned_owners_are_adopted_at_bootstrap() {
        let mut cluster = MockClusterApi::new();
        cluster.expect_list_owned().times(1).returning(|| {
            Ok(BTreeSet::from(["myspace".to_string(), "stale".to_string()]))
        });
        cluster
            .expect_delete_owned()
            .with(eq("stale"))
            .times(1)
            .returning(|_| Ok(()));

        let controller = SpaceController::new(Arc::new(cluster), None);
        let summary = controller
            .on_update(&[space("myspace", "plan-small")])
            .await
            .unwrap();
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.deleted, 1);
    }
}
