use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use maas_models::{AddressSpace, AddressSpaceStatus};

use crate::errors::ServiceError;
use crate::models::CreateAddressSpaceRequest;
use crate::store::{AddressSpaceStore, AddressStore};

/// Translates address-space requests into domain mutations against the
/// store. Space names are globally unique: realms and provisioned
/// infrastructure downstream are keyed by them.
pub struct AddressSpaceService {
    spaces: Arc<dyn AddressSpaceStore>,
    addresses: Arc<dyn AddressStore>,
    default_namespace: String,
}

impl AddressSpaceService {
    pub fn new(
        spaces: Arc<dyn AddressSpaceStore>,
        addresses: Arc<dyn AddressStore>,
        default_namespace: String,
    ) -> Self {
        Self {
            spaces,
            addresses,
            default_namespace,
        }
    }

    pub async fn health(&self) -> Result<(), ServiceError> {
        self.spaces.health().await.map_err(Into::into)
    }

    pub async fn create_space(
        &self,
        request: CreateAddressSpaceRequest,
    ) -> Result<AddressSpace, ServiceError> {
        info!("Creating address space: {}", request.name);
        request.validate()?;

        let mut builder = AddressSpace::builder()
            .name(&request.name)
            .namespace(
                request
                    .namespace
                    .as_deref()
                    .unwrap_or(&self.default_namespace),
            )
            .type_name(&request.type_name)
            .plan(&request.plan)
            .authentication_service(request.authentication_service)
            .uid(Uuid::new_v4().to_string())
            .creation_timestamp(Utc::now().to_rfc3339());
        for endpoint in request.endpoints {
            builder = builder.endpoint(endpoint);
        }
        for (key, value) in request.labels {
            builder = builder.label(key, value);
        }
        for (key, value) in request.annotations {
            builder = builder.annotation(key, value);
        }
        let space = builder.build()?;

        if self.spaces.space_exists(&space.name).await? {
            return Err(ServiceError::SpaceAlreadyExists(space.name));
        }
        self.spaces.store_space(&space).await?;

        info!("Address space created: {}", space.name);
        Ok(space)
    }

    pub async fn get_space(
        &self,
        name: &str,
    ) -> Result<Option<AddressSpace>, ServiceError> {
        Ok(self.spaces.get_space(name).await?)
    }

    pub async fn list_spaces(
        &self,
    ) -> Result<Vec<AddressSpace>, ServiceError> {
        Ok(self.spaces.list_spaces().await?)
    }

    pub async fn delete_space(&self, name: &str) -> Result<(), ServiceError> {
        info!("Deleting address space: {}", name);
        if !self.spaces.delete_space(name).await? {
            return Err(ServiceError::SpaceNotFound(name.to_string()));
        }
        let dropped = self.addresses.delete_space_addresses(name).await?;
        if dropped > 0 {
            debug!(space = %name, count = dropped, "Cascaded address deletion");
        }
        Ok(())
    }

    /// Controllers report observed readiness and endpoint hosts here.
    pub async fn update_status(
        &self,
        name: &str,
        status: AddressSpaceStatus,
    ) -> Result<AddressSpace, ServiceError> {
        let space = self
            .spaces
            .get_space(name)
            .await?
            .ok_or_else(|| ServiceError::SpaceNotFound(name.to_string()))?;
        let updated = space.with_status(status);
        self.spaces.store_space(&updated).await?;
        Ok(updated)
    }
}
