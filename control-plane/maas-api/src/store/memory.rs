use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use maas_models::{Address, AddressSpace};

use super::{AddressSpaceStore, AddressStore, StoreError};

#[derive(Default)]
pub struct MemoryAddressSpaceStore {
    spaces: RwLock<HashMap<String, AddressSpace>>,
}

impl MemoryAddressSpaceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AddressSpaceStore for MemoryAddressSpaceStore {
    async fn store_space(
        &self,
        space: &AddressSpace,
    ) -> Result<(), StoreError> {
        self.spaces
            .write()
            .await
            .insert(space.name.clone(), space.clone());
        Ok(())
    }

    async fn get_space(
        &self,
        name: &str,
    ) -> Result<Option<AddressSpace>, StoreError> {
        Ok(self.spaces.read().await.get(name).cloned())
    }

    async fn list_spaces(&self) -> Result<Vec<AddressSpace>, StoreError> {
        let mut spaces: Vec<AddressSpace> =
            self.spaces.read().await.values().cloned().collect();
        spaces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(spaces)
    }

    async fn delete_space(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.spaces.write().await.remove(name).is_some())
    }

    async fn space_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.spaces.read().await.contains_key(name))
    }

    async fn health(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryAddressStore {
    /// space name -> (address resource name -> address)
    addresses: RwLock<HashMap<String, HashMap<String, Address>>>,
}

impl MemoryAddressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AddressStore for MemoryAddressStore {
    async fn store_address(
        &self,
        address: &Address,
    ) -> Result<(), StoreError> {
        self.addresses
            .write()
            .await
            .entry(address.address_space.clone())
            .or_default()
            .insert(address.name.clone(), address.clone());
        Ok(())
    }

    async fn get_address(
        &self,
        space: &str,
        name: &str,
    ) -> Result<Option<Address>, StoreError> {
        Ok(self
            .addresses
            .read()
            .await
            .get(space)
            .and_then(|m| m.get(name))
            .cloned())
    }

    async fn list_addresses(
        &self,
        space: &str,
    ) -> Result<Vec<Address>, StoreError> {
        let mut addresses: Vec<Address> = self
            .addresses
            .read()
            .await
            .get(space)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        addresses.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(addresses)
    }

    async fn delete_address(
        &self,
        space: &str,
        name: &str,
    ) -> Result<bool, StoreError> {
        Ok(self
            .addresses
            .write()
            .await
            .get_mut(space)
            .is_some_and(|m| m.remove(name).is_some()))
    }

    async fn delete_space_addresses(
        &self,
        space: &str,
    ) -> Result<usize, StoreError> {
        Ok(self
            .addresses
            .write()
            .await
            .remove(space)
            .map(|m| m.len())
            .unwrap_or(0))
    }
}
