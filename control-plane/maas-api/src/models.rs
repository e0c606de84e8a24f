use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use maas_models::{AddressType, AuthenticationService, EndpointSpec};

/// Inbound representation of a new address space.
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct CreateAddressSpaceRequest {
    #[validate(length(min = 1, max = 63))]
    pub name: String,
    /// Defaults to the server's configured namespace when omitted.
    pub namespace: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 63))]
    pub type_name: String,
    #[validate(length(min = 1, max = 63))]
    pub plan: String,
    #[serde(default)]
    pub endpoints: Vec<EndpointSpec>,
    #[serde(default)]
    pub authentication_service: AuthenticationService,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

/// Inbound representation of a new address within a space.
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
pub struct CreateAddressRequest {
    /// Resource name on the form `space.address`; generated when omitted.
    pub name: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub address: String,
    #[serde(rename = "type")]
    pub address_type: AddressType,
    #[validate(length(min = 1, max = 63))]
    pub plan: String,
    pub topic: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ResourceResponse {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResourceResponse {
    pub fn created(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "created".to_string(),
            message: None,
        }
    }

    pub fn updated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "updated".to_string(),
            message: None,
        }
    }
}
