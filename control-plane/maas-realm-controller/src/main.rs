use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use envconfig::Envconfig;
use tracing::info;

use maas_realm_controller::identity::{HttpIdentityApi, NoDirectory};
use maas_realm_controller::{
    AddressSpaceClient, RealmControllerConfig, RealmManager, WatchDriver,
    init_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");

    let config = RealmControllerConfig::init_from_env()?;
    info!(
        api_url = %config.api_url,
        idp_url = %config.idp_url,
        poll_interval_secs = config.poll_interval_secs,
        "Loaded configuration"
    );

    let identity = Arc::new(HttpIdentityApi::new(
        config.idp_url.clone(),
        config.idp_token.clone(),
    ));
    let manager = RealmManager::new(
        identity,
        Arc::new(NoDirectory),
        Some(Duration::from_secs(config.pass_deadline_secs)),
    );

    let driver = WatchDriver::new(
        AddressSpaceClient::new(config.api_url.clone()),
        Duration::from_secs(config.poll_interval_secs),
    );
    driver.run(&manager).await;

    Ok(())
}
