use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use envconfig::Envconfig;
use tracing::info;

use maas_space_controller::cluster::HttpClusterApi;
use maas_space_controller::{
    AddressSpaceClient, SpaceController, SpaceControllerConfig, WatchDriver,
    init_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");

    let config = SpaceControllerConfig::init_from_env()?;
    info!(?config, "Loaded configuration");

    let cluster = Arc::new(HttpClusterApi::new(config.cluster_url.clone()));
    let controller = SpaceController::new(
        cluster,
        Some(Duration::from_secs(config.pass_deadline_secs)),
    );

    let driver = WatchDriver::new(
        AddressSpaceClient::new(config.api_url.clone()),
        Duration::from_secs(config.poll_interval_secs),
        config.report_status,
    );
    driver.run(&controller).await;

    Ok(())
}
