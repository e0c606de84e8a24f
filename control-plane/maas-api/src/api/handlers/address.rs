use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{error, info};

use maas_models::Address;

use crate::{
    errors::ApiError, models::CreateAddressRequest,
    models::ResourceResponse, server::AppState,
};

pub async fn create_address(
    State(state): State<AppState>,
    Path(space): Path<String>,
    Json(request): Json<CreateAddressRequest>,
) -> Result<(StatusCode, Json<ResourceResponse>), ApiError> {
    info!("API: Creating address in space {}", space);

    match state.address_service.create_address(&space, request).await {
        Ok(address) => Ok((
            StatusCode::CREATED,
            Json(ResourceResponse::created(address.name)),
        )),
        Err(e) => {
            error!("Failed to create address in {}: {}", space, e);
            Err(e.into())
        }
    }
}

pub async fn list_addresses(
    State(state): State<AppState>,
    Path(space): Path<String>,
) -> Result<Json<Vec<Address>>, ApiError> {
    match state.address_service.list_addresses(&space).await {
        Ok(addresses) => Ok(Json(addresses)),
        Err(e) => {
            error!("Failed to list addresses in {}: {}", space, e);
            Err(e.into())
        }
    }
}

pub async fn get_address(
    State(state): State<AppState>,
    Path((space, name)): Path<(String, String)>,
) -> Result<Json<Address>, ApiError> {
    match state.address_service.get_address(&space, &name).await {
        Ok(Some(address)) => Ok(Json(address)),
        Ok(None) => Err(ApiError::NotFound(format!(
            "Address not found: {}",
            name
        ))),
        Err(e) => {
            error!("Failed to get address {}: {}", name, e);
            Err(e.into())
        }
    }
}

pub async fn delete_address(
    State(state): State<AppState>,
    Path((space, name)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    info!("API: Deleting address {} in space {}", name, space);

    match state.address_service.delete_address(&space, &name).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete address {}: {}", name, e);
            Err(e.into())
        }
    }
}
