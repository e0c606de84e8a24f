use serde_json::json;

use crate::cluster::InfraResource;

use super::{RenderContext, TemplateError, owner_labels, plan_replicas};

/// Single-broker topology: clients talk to the broker directly, no router
/// tier. The plan still has to resolve, but the broker never scales past
/// one instance.
pub struct BrokeredTemplate;

impl BrokeredTemplate {
    pub fn render(
        &self,
        ctx: &RenderContext<'_>,
    ) -> Result<Vec<InfraResource>, TemplateError> {
        plan_replicas(ctx.plan)?;
        let labels = owner_labels(ctx);

        Ok(vec![
            InfraResource {
                kind: "deployment".to_string(),
                name: format!("{}-broker", ctx.name),
                labels: labels.clone(),
                spec: json!({
                    "component": "broker",
                    "namespace": ctx.namespace,
                    "replicas": 1,
                    "ports": { "amqp": 5672, "amqps": 5671 },
                }),
            },
            InfraResource {
                kind: "service".to_string(),
                name: format!("{}-messaging", ctx.name),
                labels,
                spec: json!({
                    "component": "broker",
                    "namespace": ctx.namespace,
                    "ports": { "amqp": 5672, "amqps": 5671 },
                }),
            },
        ])
    }
}
