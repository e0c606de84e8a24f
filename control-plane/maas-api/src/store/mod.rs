pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use maas_models::{Address, AddressSpace};

use crate::config::StoreType;

#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("store internal error: {0}")]
    Internal(String),
}

#[async_trait]
pub trait AddressSpaceStore: Send + Sync {
    async fn store_space(
        &self,
        space: &AddressSpace,
    ) -> Result<(), StoreError>;

    async fn get_space(
        &self,
        name: &str,
    ) -> Result<Option<AddressSpace>, StoreError>;

    async fn list_spaces(&self) -> Result<Vec<AddressSpace>, StoreError>;

    /// Returns whether the space existed.
    async fn delete_space(&self, name: &str) -> Result<bool, StoreError>;

    async fn space_exists(&self, name: &str) -> Result<bool, StoreError>;

    async fn health(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait AddressStore: Send + Sync {
    async fn store_address(
        &self,
        address: &Address,
    ) -> Result<(), StoreError>;

    async fn get_address(
        &self,
        space: &str,
        name: &str,
    ) -> Result<Option<Address>, StoreError>;

    async fn list_addresses(
        &self,
        space: &str,
    ) -> Result<Vec<Address>, StoreError>;

    async fn delete_address(
        &self,
        space: &str,
        name: &str,
    ) -> Result<bool, StoreError>;

    /// Drops every address owned by the space; returns how many were
    /// removed.
    async fn delete_space_addresses(
        &self,
        space: &str,
    ) -> Result<usize, StoreError>;
}

pub struct Stores {
    pub spaces: std::sync::Arc<dyn AddressSpaceStore>,
    pub addresses: std::sync::Arc<dyn AddressStore>,
}

pub fn create_stores(store_type: &StoreType) -> Stores {
    match store_type {
        StoreType::Memory => Stores {
            spaces: std::sync::Arc::new(
                memory::MemoryAddressSpaceStore::new(),
            ),
            addresses: std::sync::Arc::new(
                memory::MemoryAddressStore::new(),
            ),
        },
    }
}
