use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct RealmControllerConfig {
    /// Base URL of the address-space API the controller polls.
    #[envconfig(from = "MAAS_API_URL", default = "http://localhost:8080")]
    pub api_url: String,

    /// Base URL of the identity provider's admin API.
    #[envconfig(from = "MAAS_IDP_URL", default = "http://localhost:8081")]
    pub idp_url: String,

    /// Bearer token for the identity provider's admin API.
    #[envconfig(from = "MAAS_IDP_TOKEN")]
    pub idp_token: Option<String>,

    #[envconfig(from = "MAAS_REALM_POLL_INTERVAL_SECS", default = "30")]
    pub poll_interval_secs: u64,

    /// Wall-clock budget for one reconciliation pass.
    #[envconfig(from = "MAAS_REALM_PASS_DEADLINE_SECS", default = "120")]
    pub pass_deadline_secs: u64,
}
