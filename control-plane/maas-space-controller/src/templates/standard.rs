use serde_json::json;

use crate::cluster::InfraResource;

use super::{RenderContext, TemplateError, owner_labels, plan_replicas};

/// Routed topology: stateless router tier in front of a broker tier, a
/// messaging entry point, and the optional tenant console.
pub struct StandardTemplate;

impl StandardTemplate {
    pub fn render(
        &self,
        ctx: &RenderContext<'_>,
    ) -> Result<Vec<InfraResource>, TemplateError> {
        let replicas = plan_replicas(ctx.plan)?;
        let labels = owner_labels(ctx);

        let mut resources = vec![
            InfraResource {
                kind: "deployment".to_string(),
                name: format!("{}-router", ctx.name),
                labels: labels.clone(),
                spec: json!({
                    "component": "router",
                    "namespace": ctx.namespace,
                    "replicas": replicas,
                    "ports": { "amqp": 5672, "amqps": 5671, "inter-router": 55672 },
                }),
            },
            InfraResource {
                kind: "deployment".to_string(),
                name: format!("{}-broker", ctx.name),
                labels: labels.clone(),
                spec: json!({
                    "component": "broker",
                    "namespace": ctx.namespace,
                    "replicas": replicas,
                    "ports": { "amqp": 5672 },
                }),
            },
            InfraResource {
                kind: "service".to_string(),
                name: format!("{}-messaging", ctx.name),
                labels: labels.clone(),
                spec: json!({
                    "component": "router",
                    "namespace": ctx.namespace,
                    "ports": { "amqp": 5672, "amqps": 5671 },
                }),
            },
        ];

        if ctx.has_console {
            resources.push(InfraResource {
                kind: "service".to_string(),
                name: format!("{}-console", ctx.name),
                labels,
                spec: json!({
                    "component": "console",
                    "namespace": ctx.namespace,
                    "ports": { "https": 443 },
                }),
            });
        }

        Ok(resources)
    }
}
