use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Authentication service flavor attached to an address space.
///
/// `Standard` is the only flavor backed by a platform-managed realm; `None`
/// disables authentication and `External` delegates to a customer-provided
/// provider described by the service details.
#[derive(
    Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationServiceType {
    #[default]
    None,
    Standard,
    External,
}

impl AuthenticationServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticationServiceType::None => "none",
            AuthenticationServiceType::Standard => "standard",
            AuthenticationServiceType::External => "external",
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct AuthenticationService {
    #[serde(rename = "type")]
    pub service_type: AuthenticationServiceType,
    /// Provider-specific settings (host/port for `external`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
}

impl AuthenticationService {
    pub fn new(service_type: AuthenticationServiceType) -> Self {
        Self {
            service_type,
            details: BTreeMap::new(),
        }
    }
}
