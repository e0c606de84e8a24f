use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::auth::AuthenticationService;
use crate::endpoint::{EndpointSpec, EndpointStatus};
use crate::error::ModelError;
use crate::name::validate_name;

/// A tenant-scoped messaging infrastructure instance.
///
/// Immutable once built; identity is (`name`, `namespace`). Use
/// [`AddressSpace::builder`] to construct and validate instances, and the
/// `with_*` methods to derive updated copies.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct AddressSpace {
    pub name: String,
    pub namespace: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub plan: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<EndpointSpec>,
    #[serde(default)]
    pub authentication_service: AuthenticationService,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<String>,
    #[serde(default)]
    pub status: AddressSpaceStatus,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressSpaceStatus {
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoint_statuses: Vec<EndpointStatus>,
}

impl AddressSpaceStatus {
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Default::default()
        }
    }
}

impl AddressSpace {
    pub fn builder() -> AddressSpaceBuilder {
        AddressSpaceBuilder::default()
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Externally reachable host of the named endpoint, if the controller
    /// has reported one.
    pub fn endpoint_host(&self, endpoint: &str) -> Option<&str> {
        self.status
            .endpoint_statuses
            .iter()
            .find(|e| e.name == endpoint)
            .and_then(|e| e.host.as_deref().or(Some(e.service_host.as_str())))
    }

    pub fn with_annotation(mut self, key: &str, value: &str) -> Self {
        self.annotations.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_status(mut self, status: AddressSpaceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        validate_name(&self.namespace)?;
        if self.type_name.is_empty() {
            return Err(ModelError::MissingField("type"));
        }
        if self.plan.is_empty() {
            return Err(ModelError::MissingField("plan"));
        }
        Ok(())
    }
}

impl PartialEq for AddressSpace {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.namespace == other.namespace
    }
}

impl Eq for AddressSpace {}

impl Hash for AddressSpace {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.namespace.hash(state);
    }
}

#[derive(Default)]
pub struct AddressSpaceBuilder {
    name: Option<String>,
    namespace: Option<String>,
    type_name: Option<String>,
    plan: Option<String>,
    endpoints: Vec<EndpointSpec>,
    authentication_service: AuthenticationService,
    labels: BTreeMap<String, String>,
    annotations: BTreeMap<String, String>,
    uid: Option<String>,
    creation_timestamp: Option<String>,
    status: AddressSpaceStatus,
}

impl AddressSpaceBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    pub fn endpoint(mut self, endpoint: EndpointSpec) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn authentication_service(
        mut self,
        service: AuthenticationService,
    ) -> Self {
        self.authentication_service = service;
        self
    }

    pub fn label(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn annotation(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn creation_timestamp(mut self, ts: impl Into<String>) -> Self {
        self.creation_timestamp = Some(ts.into());
        self
    }

    pub fn status(mut self, status: AddressSpaceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> Result<AddressSpace, ModelError> {
        let space = AddressSpace {
            name: self.name.ok_or(ModelError::MissingField("name"))?,
            namespace: self
                .namespace
                .ok_or(ModelError::MissingField("namespace"))?,
            type_name: self
                .type_name
                .ok_or(ModelError::MissingField("type"))?,
            plan: self.plan.ok_or(ModelError::MissingField("plan"))?,
            endpoints: self.endpoints,
            authentication_service: self.authentication_service,
            labels: self.labels,
            annotations: self.annotations,
            uid: self.uid,
            creation_timestamp: self.creation_timestamp,
            status: self.status,
        };
        space.validate()?;
        Ok(space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticationServiceType;

    fn base() -> AddressSpaceBuilder {
        AddressSpace::builder()
            .name("myspace")
            .namespace("myns")
            .type_name("standard")
            .plan("plan-small")
    }

    #[test]
    fn builds_valid_space() {
        let space = base()
            .authentication_service(AuthenticationService::new(
                AuthenticationServiceType::Standard,
            ))
            .build()
            .unwrap();
        assert_eq!(space.name, "myspace");
        assert_eq!(
            space.authentication_service.service_type,
            AuthenticationServiceType::Standard
        );
        assert!(!space.status.ready);
    }

    #[test]
    fn rejects_missing_fields() {
        let err = AddressSpace::builder().name("x").build().unwrap_err();
        assert_eq!(err, ModelError::MissingField("namespace"));
    }

    #[test]
    fn rejects_invalid_name() {
        assert!(base().name("My_Space").build().is_err());
    }

    #[test]
    fn identity_ignores_spec_fields() {
        let a = base().build().unwrap();
        let b = base().plan("plan-large").build().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn endpoint_host_prefers_external_host() {
        let space = base()
            .status(AddressSpaceStatus {
                ready: true,
                messages: vec![],
                endpoint_statuses: vec![EndpointStatus {
                    name: "console".into(),
                    service_host: "console.svc".into(),
                    port: 443,
                    host: Some("console.example.com".into()),
                }],
            })
            .build()
            .unwrap();
        assert_eq!(
            space.endpoint_host("console"),
            Some("console.example.com")
        );
        assert_eq!(space.endpoint_host("messaging"), None);
    }
}
