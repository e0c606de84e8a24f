use serde::{Deserialize, Serialize};

/// Desired endpoint exposed by an address space (e.g. the console or the
/// messaging entry point).
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EndpointSpec {
    pub name: String,
    pub service: String,
    pub service_port: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_provider: Option<String>,
}

/// Observed state of an exposed endpoint.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EndpointStatus {
    pub name: String,
    pub service_host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}
