use std::collections::BTreeMap;
use std::sync::Arc;

use maas_api::config::StoreType;
use maas_api::models::{CreateAddressRequest, CreateAddressSpaceRequest};
use maas_api::services::{AddressService, AddressSpaceService};
use maas_api::{ServiceError, create_stores};
use maas_models::{
    AddressSpaceStatus, AddressType, AuthenticationService,
    AuthenticationServiceType, EndpointStatus,
};

fn services() -> (Arc<AddressSpaceService>, Arc<AddressService>) {
    let stores = create_stores(&StoreType::Memory);
    let spaces = Arc::new(AddressSpaceService::new(
        stores.spaces.clone(),
        stores.addresses.clone(),
        "default".to_string(),
    ));
    let addresses = Arc::new(AddressService::new(
        stores.spaces.clone(),
        stores.addresses.clone(),
    ));
    (spaces, addresses)
}

fn space_request(name: &str) -> CreateAddressSpaceRequest {
    CreateAddressSpaceRequest {
        name: name.to_string(),
        namespace: None,
        type_name: "standard".to_string(),
        plan: "plan-small".to_string(),
        endpoints: vec![],
        authentication_service: AuthenticationService::new(
            AuthenticationServiceType::Standard,
        ),
        annotations: BTreeMap::new(),
        labels: BTreeMap::new(),
    }
}

#[tokio::test]
async fn create_space_stamps_identity_fields() {
    let (spaces, _) = services();
    let space = spaces.create_space(space_request("myspace")).await.unwrap();

    assert_eq!(space.namespace, "default");
    assert!(space.uid.is_some());
    assert!(space.creation_timestamp.is_some());
    assert!(!space.status.ready);
}

#[tokio::test]
async fn duplicate_space_is_rejected() {
    let (spaces, _) = services();
    spaces.create_space(space_request("myspace")).await.unwrap();

    let err = spaces
        .create_space(space_request("myspace"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::SpaceAlreadyExists(_)));
}

#[tokio::test]
async fn invalid_space_name_is_rejected() {
    let (spaces, _) = services();
    let err = spaces
        .create_space(space_request("My_Space"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Model(_)));
}

#[tokio::test]
async fn deleting_a_space_cascades_its_addresses() {
    let (spaces, addresses) = services();
    spaces.create_space(space_request("myspace")).await.unwrap();
    addresses
        .create_address(
            "myspace",
            CreateAddressRequest {
                name: None,
                address: "orders".to_string(),
                address_type: AddressType::Queue,
                plan: "plan-small".to_string(),
                topic: None,
            },
        )
        .await
        .unwrap();

    spaces.delete_space("myspace").await.unwrap();

    spaces.create_space(space_request("myspace")).await.unwrap();
    let listed = addresses.list_addresses("myspace").await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn address_requires_existing_space() {
    let (_, addresses) = services();
    let err = addresses
        .create_address(
            "missing",
            CreateAddressRequest {
                name: None,
                address: "orders".to_string(),
                address_type: AddressType::Queue,
                plan: "plan-small".to_string(),
                topic: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::SpaceNotFound(_)));
}

#[tokio::test]
async fn address_name_is_generated_and_scoped_to_the_space() {
    let (spaces, addresses) = services();
    spaces.create_space(space_request("myspace")).await.unwrap();

    let address = addresses
        .create_address(
            "myspace",
            CreateAddressRequest {
                name: None,
                address: "orders".to_string(),
                address_type: AddressType::Queue,
                plan: "plan-small".to_string(),
                topic: None,
            },
        )
        .await
        .unwrap();
    assert!(address.name.starts_with("myspace."));

    let err = addresses
        .create_address(
            "myspace",
            CreateAddressRequest {
                name: Some("otherspace.orders".to_string()),
                address: "orders2".to_string(),
                address_type: AddressType::Queue,
                plan: "plan-small".to_string(),
                topic: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Model(_)));
}

#[tokio::test]
async fn status_updates_are_visible_on_read() {
    let (spaces, _) = services();
    spaces.create_space(space_request("myspace")).await.unwrap();

    spaces
        .update_status(
            "myspace",
            AddressSpaceStatus {
                ready: true,
                messages: vec![],
                endpoint_statuses: vec![EndpointStatus {
                    name: "console".to_string(),
                    service_host: "console.svc".to_string(),
                    port: 443,
                    host: Some("console.example.com".to_string()),
                }],
            },
        )
        .await
        .unwrap();

    let space = spaces.get_space("myspace").await.unwrap().unwrap();
    assert!(space.status.ready);
    assert_eq!(
        space.endpoint_host("console"),
        Some("console.example.com")
    );
}
