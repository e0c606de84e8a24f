use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;
use crate::name::{sanitize_name, validate_name};

/// Kind of a messaging address within an address space.
#[derive(
    Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Queue,
    Topic,
    Anycast,
    Multicast,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Queue => "queue",
            AddressType::Topic => "topic",
            AddressType::Anycast => "anycast",
            AddressType::Multicast => "multicast",
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressStatus {
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

/// A single messaging destination (queue, topic, ...) scoped to an address
/// space. Identity is (`address`, `address_space`, `namespace`); the `name`
/// is the orchestrator resource name on the form `space.address`.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Address {
    pub name: String,
    pub address: String,
    pub address_space: String,
    pub namespace: String,
    #[serde(rename = "type")]
    pub address_type: AddressType,
    pub plan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub status: AddressStatus,
}

impl Address {
    pub fn builder() -> AddressBuilder {
        AddressBuilder::default()
    }

    /// Deterministic resource name for an address: sanitized components
    /// suffixed with a UUID derived from the raw address string, so the
    /// result is stable across observation cycles.
    pub fn generate_name(address_space: &str, address: &str) -> String {
        let uuid = Uuid::new_v5(&Uuid::NAMESPACE_URL, address.as_bytes());
        format!(
            "{}.{}",
            sanitize_name(address_space),
            sanitize_name(&format!("{}-{}", sanitize_name(address), uuid))
        )
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.namespace)?;
        let components: Vec<&str> = self.name.split('.').collect();
        if components.len() < 2 {
            return Err(ModelError::MalformedAddressName(self.name.clone()));
        }
        if components[0] != self.address_space {
            return Err(ModelError::AddressSpaceMismatch {
                name: self.name.clone(),
                space: self.address_space.clone(),
            });
        }
        for component in components {
            validate_name(component)?;
        }
        Ok(())
    }

    pub fn with_status(mut self, status: AddressStatus) -> Self {
        self.status = status;
        self
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
            && self.address_space == other.address_space
            && self.namespace == other.namespace
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
        self.address_space.hash(state);
        self.namespace.hash(state);
    }
}

#[derive(Default)]
pub struct AddressBuilder {
    name: Option<String>,
    address: Option<String>,
    address_space: Option<String>,
    namespace: Option<String>,
    address_type: Option<AddressType>,
    plan: Option<String>,
    topic: Option<String>,
    labels: BTreeMap<String, String>,
    annotations: BTreeMap<String, String>,
    status: AddressStatus,
}

impl AddressBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn address_space(mut self, space: impl Into<String>) -> Self {
        self.address_space = Some(space.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn address_type(mut self, address_type: AddressType) -> Self {
        self.address_type = Some(address_type);
        self
    }

    pub fn plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
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

    pub fn status(mut self, status: AddressStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> Result<Address, ModelError> {
        let address_space = self
            .address_space
            .ok_or(ModelError::MissingField("address_space"))?;
        let address =
            self.address.ok_or(ModelError::MissingField("address"))?;
        let namespace = self
            .namespace
            .ok_or(ModelError::MissingField("namespace"))?;
        // Resource name defaults to the deterministic generated form.
        let name = self.name.unwrap_or_else(|| {
            Address::generate_name(&address_space, &address)
        });
        let addr = Address {
            name,
            address,
            address_space,
            namespace,
            address_type: self
                .address_type
                .ok_or(ModelError::MissingField("type"))?,
            plan: self.plan.ok_or(ModelError::MissingField("plan"))?,
            topic: self.topic,
            labels: self.labels,
            annotations: self.annotations,
            status: self.status,
        };
        addr.validate()?;
        Ok(addr)
    }
}
