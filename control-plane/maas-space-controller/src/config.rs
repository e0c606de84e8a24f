use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct SpaceControllerConfig {
    /// Base URL of the address-space API the controller polls.
    #[envconfig(from = "MAAS_API_URL", default = "http://localhost:8080")]
    pub api_url: String,

    /// Base URL of the cluster resource gateway.
    #[envconfig(from = "MAAS_CLUSTER_URL", default = "http://localhost:8082")]
    pub cluster_url: String,

    #[envconfig(from = "MAAS_SPACE_POLL_INTERVAL_SECS", default = "30")]
    pub poll_interval_secs: u64,

    /// Wall-clock budget for one reconciliation pass.
    #[envconfig(from = "MAAS_SPACE_PASS_DEADLINE_SECS", default = "300")]
    pub pass_deadline_secs: u64,

    /// Report `ready` back to the API after a successful pass.
    #[envconfig(from = "MAAS_SPACE_REPORT_STATUS", default = "true")]
    pub report_status: bool,
}
