pub mod brokered;
pub mod standard;

pub use brokered::BrokeredTemplate;
pub use standard::StandardTemplate;

use std::collections::BTreeMap;

use thiserror::Error;

use maas_models::{AddressSpace, LABEL_OWNER, LABEL_SPACE_TYPE};

use crate::cluster::InfraResource;

#[derive(Error, Debug, Clone)]
pub enum TemplateError {
    #[error("no template for address space type '{0}'")]
    UnknownSpaceType(String),

    #[error("unknown plan '{0}'")]
    UnknownPlan(String),
}

/// Inputs a template needs to render the infrastructure of one space.
pub struct RenderContext<'a> {
    pub name: &'a str,
    pub namespace: &'a str,
    pub type_name: &'a str,
    pub plan: &'a str,
    pub has_console: bool,
}

impl<'a> RenderContext<'a> {
    pub fn from_space(space: &'a AddressSpace) -> Self {
        Self {
            name: &space.name,
            namespace: &space.namespace,
            type_name: &space.type_name,
            plan: &space.plan,
            has_console: space.endpoints.iter().any(|e| e.name == "console"),
        }
    }
}

/// Scaling knobs derived from the plan name.
pub(crate) fn plan_replicas(plan: &str) -> Result<i32, TemplateError> {
    match plan {
        "plan-small" => Ok(1),
        "plan-medium" => Ok(2),
        "plan-large" => Ok(3),
        other => Err(TemplateError::UnknownPlan(other.to_string())),
    }
}

pub(crate) fn owner_labels(
    ctx: &RenderContext<'_>,
) -> BTreeMap<String, String> {
    BTreeMap::from([
        (LABEL_OWNER.to_string(), ctx.name.to_string()),
        (LABEL_SPACE_TYPE.to_string(), ctx.type_name.to_string()),
    ])
}

/// Renders the full infrastructure resource list for an address space,
/// dispatching on the space type.
#[derive(Default)]
pub struct TemplateManager;

impl TemplateManager {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        ctx: &RenderContext<'_>,
    ) -> Result<Vec<InfraResource>, TemplateError> {
        match ctx.type_name {
            "standard" => StandardTemplate.render(ctx),
            "brokered" => BrokeredTemplate.render(ctx),
            other => {
                Err(TemplateError::UnknownSpaceType(other.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maas_models::AddressSpace;

    fn space(type_name: &str, plan: &str) -> AddressSpace {
        AddressSpace::builder()
            .name("myspace")
            .namespace("myns")
            .type_name(type_name)
            .plan(plan)
            .endpoint(maas_models::EndpointSpec {
                name: "console".to_string(),
                service: "console".to_string(),
                service_port: "https".to_string(),
                host: None,
                cert_provider: None,
            })
            .build()
            .unwrap()
    }

    #[test]
    fn standard_space_renders_router_broker_and_services() {
        let space = space("standard", "plan-small");
        let resources = TemplateManager::new()
            .render(&RenderContext::from_space(&space))
            .unwrap();

        let names: Vec<&str> =
            resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "myspace-router",
                "myspace-broker",
                "myspace-messaging",
                "myspace-console",
            ]
        );
        for resource in &resources {
            assert_eq!(
                resource.labels.get(maas_models::LABEL_OWNER).unwrap(),
                "myspace"
            );
        }
    }

    #[test]
    fn plan_controls_replica_counts() {
        let space = space("standard", "plan-large");
        let resources = TemplateManager::new()
            .render(&RenderContext::from_space(&space))
            .unwrap();
        let router = resources
            .iter()
            .find(|r| r.name == "myspace-router")
            .unwrap();
        assert_eq!(router.spec["replicas"], 3);
    }

    #[test]
    fn brokered_space_renders_single_broker() {
        let space = space("brokered", "plan-small");
        let resources = TemplateManager::new()
            .render(&RenderContext::from_space(&space))
            .unwrap();
        let names: Vec<&str> =
            resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["myspace-broker", "myspace-messaging"]);
    }

    #[test]
    fn unknown_type_and_plan_are_rejected() {
        let bad_type = space("exotic", "plan-small");
        assert!(matches!(
            TemplateManager::new()
                .render(&RenderContext::from_space(&bad_type)),
            Err(TemplateError::UnknownSpaceType(_))
        ));

        let bad_plan = space("standard", "plan-huge");
        assert!(matches!(
            TemplateManager::new()
                .render(&RenderContext::from_space(&bad_plan)),
            Err(TemplateError::UnknownPlan(_))
        ));
    }
}
