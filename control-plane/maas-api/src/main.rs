use std::sync::Arc;

use anyhow::Result;
use envconfig::Envconfig;
use tracing::info;

use maas_api::{
    config::ApiConfig,
    create_stores, init_tracing,
    server::ApiServer,
    services::{AddressService, AddressSpaceService},
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");

    let config = ApiConfig::init_from_env()?;
    info!(?config, "Loaded configuration");

    let stores = create_stores(&config.store());
    let space_service = Arc::new(AddressSpaceService::new(
        stores.spaces.clone(),
        stores.addresses.clone(),
        config.default_namespace.clone(),
    ));
    let address_service = Arc::new(AddressService::new(
        stores.spaces.clone(),
        stores.addresses.clone(),
    ));

    ApiServer::new(space_service, address_service, config)
        .serve()
        .await
}
