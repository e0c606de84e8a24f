use std::sync::Arc;

use tracing::info;
use validator::Validate;

use maas_models::Address;

use crate::errors::ServiceError;
use crate::models::CreateAddressRequest;
use crate::store::{AddressSpaceStore, AddressStore};

pub struct AddressService {
    spaces: Arc<dyn AddressSpaceStore>,
    addresses: Arc<dyn AddressStore>,
}

impl AddressService {
    pub fn new(
        spaces: Arc<dyn AddressSpaceStore>,
        addresses: Arc<dyn AddressStore>,
    ) -> Self {
        Self { spaces, addresses }
    }

    pub async fn create_address(
        &self,
        space: &str,
        request: CreateAddressRequest,
    ) -> Result<Address, ServiceError> {
        info!(space = %space, address = %request.address, "Creating address");
        request.validate()?;

        let owner = self
            .spaces
            .get_space(space)
            .await?
            .ok_or_else(|| ServiceError::SpaceNotFound(space.to_string()))?;

        let mut builder = Address::builder()
            .address(&request.address)
            .address_space(&owner.name)
            .namespace(&owner.namespace)
            .address_type(request.address_type)
            .plan(&request.plan);
        if let Some(name) = request.name {
            builder = builder.name(name);
        }
        if let Some(topic) = request.topic {
            builder = builder.topic(topic);
        }
        let address = builder.build()?;

        if self
            .addresses
            .get_address(space, &address.name)
            .await?
            .is_some()
        {
            return Err(ServiceError::AddressAlreadyExists(address.name));
        }
        self.addresses.store_address(&address).await?;

        Ok(address)
    }

    pub async fn get_address(
        &self,
        space: &str,
        name: &str,
    ) -> Result<Option<Address>, ServiceError> {
        Ok(self.addresses.get_address(space, name).await?)
    }

    pub async fn list_addresses(
        &self,
        space: &str,
    ) -> Result<Vec<Address>, ServiceError> {
        if !self.spaces.space_exists(space).await? {
            return Err(ServiceError::SpaceNotFound(space.to_string()));
        }
        Ok(self.addresses.list_addresses(space).await?)
    }

    pub async fn delete_address(
        &self,
        space: &str,
        name: &str,
    ) -> Result<(), ServiceError> {
        info!(space = %space, address = %name, "Deleting address");
        if !self.addresses.delete_address(space, name).await? {
            return Err(ServiceError::AddressNotFound(name.to_string()));
        }
        Ok(())
    }
}
