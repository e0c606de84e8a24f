use envconfig::Envconfig;
use tracing::warn;

#[derive(Envconfig, Clone, Debug)]
pub struct ApiConfig {
    #[envconfig(from = "MAAS_API_HOST", default = "0.0.0.0")]
    pub host: String,

    #[envconfig(from = "MAAS_API_PORT", default = "8080")]
    pub port: u16,

    /// Backing store kind; only "memory" is implemented so far.
    #[envconfig(from = "MAAS_API_STORE", default = "memory")]
    pub store_type: String,

    /// Namespace assigned to address spaces created without one.
    #[envconfig(from = "MAAS_API_DEFAULT_NAMESPACE", default = "default")]
    pub default_namespace: String,
}

#[derive(Debug, Clone)]
pub enum StoreType {
    Memory,
}

impl ApiConfig {
    pub fn store(&self) -> StoreType {
        match self.store_type.to_lowercase().as_str() {
            "memory" => StoreType::Memory,
            other => {
                warn!(
                    "Unrecognized store type '{}', falling back to 'memory'.",
                    other
                );
                StoreType::Memory
            }
        }
    }
}
