use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tracing::info;

use crate::{
    api::{create_middleware_stack, handlers},
    config::ApiConfig,
    services::{AddressService, AddressSpaceService},
};

#[derive(Clone)]
pub struct AppState {
    pub space_service: Arc<AddressSpaceService>,
    pub address_service: Arc<AddressService>,
}

pub struct ApiServer {
    app: Router,
    config: ApiConfig,
}

impl ApiServer {
    pub fn new(
        space_service: Arc<AddressSpaceService>,
        address_service: Arc<AddressService>,
        config: ApiConfig,
    ) -> Self {
        let state = AppState {
            space_service,
            address_service,
        };

        let app = Router::new()
            // Address space APIs
            .route(
                "/api/v1/addressspaces",
                post(handlers::create_address_space),
            )
            .route(
                "/api/v1/addressspaces",
                get(handlers::list_address_spaces),
            )
            .route(
                "/api/v1/addressspaces/{name}",
                get(handlers::get_address_space),
            )
            .route(
                "/api/v1/addressspaces/{name}",
                delete(handlers::delete_address_space),
            )
            .route(
                "/api/v1/addressspaces/{name}/status",
                put(handlers::update_address_space_status),
            )
            // Address APIs (nested under their space)
            .route(
                "/api/v1/addressspaces/{space}/addresses",
                post(handlers::create_address),
            )
            .route(
                "/api/v1/addressspaces/{space}/addresses",
                get(handlers::list_addresses),
            )
            .route(
                "/api/v1/addressspaces/{space}/addresses/{name}",
                get(handlers::get_address),
            )
            .route(
                "/api/v1/addressspaces/{space}/addresses/{name}",
                delete(handlers::delete_address),
            )
            // Health check endpoint
            .route("/health", get(health_check))
            .layer(create_middleware_stack())
            .with_state(state);

        Self { app, config }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr: SocketAddr =
            format!("{}:{}", self.config.host, self.config.port).parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("Address space API listening on {}", addr);

        axum::serve(listener, self.app).await?;

        Ok(())
    }

    /// Hand back the underlying router so tests can serve it on an
    /// ephemeral port.
    pub fn into_router(self) -> Router {
        self.app
    }
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "healthy",
        "service": "maas-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
