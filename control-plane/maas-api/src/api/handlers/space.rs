use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{error, info};

use maas_models::{AddressSpace, AddressSpaceStatus};

use crate::{
    errors::ApiError, models::CreateAddressSpaceRequest,
    models::ResourceResponse, server::AppState,
};

pub async fn create_address_space(
    State(state): State<AppState>,
    Json(request): Json<CreateAddressSpaceRequest>,
) -> Result<(StatusCode, Json<ResourceResponse>), ApiError> {
    info!("API: Creating address space: {}", request.name);

    match state.space_service.create_space(request).await {
        Ok(space) => {
            Ok((StatusCode::CREATED, Json(ResourceResponse::created(space.name))))
        }
        Err(e) => {
            error!("Failed to create address space: {}", e);
            Err(e.into())
        }
    }
}

pub async fn list_address_spaces(
    State(state): State<AppState>,
) -> Result<Json<Vec<AddressSpace>>, ApiError> {
    match state.space_service.list_spaces().await {
        Ok(spaces) => Ok(Json(spaces)),
        Err(e) => {
            error!("Failed to list address spaces: {}", e);
            Err(e.into())
        }
    }
}

pub async fn get_address_space(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<AddressSpace>, ApiError> {
    match state.space_service.get_space(&name).await {
        Ok(Some(space)) => Ok(Json(space)),
        Ok(None) => Err(ApiError::NotFound(format!(
            "Address space not found: {}",
            name
        ))),
        Err(e) => {
            error!("Failed to get address space {}: {}", name, e);
            Err(e.into())
        }
    }
}

pub async fn delete_address_space(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    info!("API: Deleting address space: {}", name);

    match state.space_service.delete_space(&name).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete address space {}: {}", name, e);
            Err(e.into())
        }
    }
}

pub async fn update_address_space_status(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(status): Json<AddressSpaceStatus>,
) -> Result<Json<ResourceResponse>, ApiError> {
    match state.space_service.update_status(&name, status).await {
        Ok(space) => Ok(Json(ResourceResponse::updated(space.name))),
        Err(e) => {
            error!("Failed to update status of {}: {}", name, e);
            Err(e.into())
        }
    }
}
