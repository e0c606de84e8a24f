use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use maas_models::{
    ANNOTATION_CREATED_BY, AddressSpace, AddressSpaceStatus,
    AuthenticationService, AuthenticationServiceType, EndpointSpec,
    EndpointStatus,
};
use maas_realm_controller::identity::{
    DirectoryApi, IdentityApi, IdentityError, RealmSpec, RealmUser,
};
use maas_realm_controller::manager::RealmManager;

/// In-memory identity provider owning its own realm and user state,
/// injected into the manager under test.
#[derive(Default)]
struct InMemoryIdentity {
    realms: Mutex<BTreeSet<String>>,
    specs: Mutex<HashMap<String, RealmSpec>>,
    admins: Mutex<HashMap<String, RealmUser>>,
}

impl InMemoryIdentity {
    fn realm_set(&self) -> BTreeSet<String> {
        self.realms.lock().unwrap().clone()
    }

    fn admin(&self, realm: &str) -> Option<RealmUser> {
        self.admins.lock().unwrap().get(realm).cloned()
    }
}

#[async_trait]
impl IdentityApi for InMemoryIdentity {
    async fn realm_names(&self) -> Result<BTreeSet<String>, IdentityError> {
        Ok(self.realm_set())
    }

    async fn create_realm(
        &self,
        realm: &RealmSpec,
    ) -> Result<(), IdentityError> {
        self.realms.lock().unwrap().insert(realm.name.clone());
        self.specs
            .lock()
            .unwrap()
            .insert(realm.name.clone(), realm.clone());
        Ok(())
    }

    async fn delete_realm(&self, name: &str) -> Result<(), IdentityError> {
        self.realms.lock().unwrap().remove(name);
        self.specs.lock().unwrap().remove(name);
        self.admins.lock().unwrap().remove(name);
        Ok(())
    }

    async fn create_user(
        &self,
        realm: &str,
        user: &RealmUser,
    ) -> Result<(), IdentityError> {
        self.admins
            .lock()
            .unwrap()
            .insert(realm.to_string(), user.clone());
        Ok(())
    }
}

struct StaticDirectory {
    users: HashMap<String, String>,
}

#[async_trait]
impl DirectoryApi for StaticDirectory {
    async fn find_user_id(
        &self,
        username: &str,
    ) -> Result<Option<String>, IdentityError> {
        Ok(self.users.get(username).cloned())
    }
}

fn space(
    name: &str,
    auth_type: AuthenticationServiceType,
) -> AddressSpace {
    AddressSpace::builder()
        .name(name)
        .namespace("myns")
        .type_name("standard")
        .plan("plan-small")
        .annotation(ANNOTATION_CREATED_BY, "developer")
        .endpoint(EndpointSpec {
            name: "console".to_string(),
            service: "console".to_string(),
            service_port: "https".to_string(),
            host: None,
            cert_provider: None,
        })
        .status(AddressSpaceStatus {
            ready: true,
            messages: vec![],
            endpoint_statuses: vec![EndpointStatus {
                name: "console".to_string(),
                service_host: "console.svc".to_string(),
                port: 443,
                host: Some("console.example.com".to_string()),
            }],
        })
        .authentication_service(AuthenticationService::new(auth_type))
        .build()
        .unwrap()
}

fn manager(identity: Arc<InMemoryIdentity>) -> RealmManager {
    RealmManager::new(
        identity,
        Arc::new(StaticDirectory {
            users: HashMap::new(),
        }),
        None,
    )
}

#[tokio::test]
async fn add_address_spaces() {
    let identity = Arc::new(InMemoryIdentity::default());
    let manager = manager(identity.clone());

    manager
        .on_update(&[space("a1", AuthenticationServiceType::None)])
        .await
        .unwrap();
    assert!(identity.realm_set().is_empty());

    manager
        .on_update(&[
            space("a1", AuthenticationServiceType::None),
            space("a2", AuthenticationServiceType::Standard),
        ])
        .await
        .unwrap();
    assert!(identity.realm_set().contains("a2"));

    manager
        .on_update(&[
            space("a1", AuthenticationServiceType::None),
            space("a2", AuthenticationServiceType::Standard),
            space("a3", AuthenticationServiceType::Standard),
        ])
        .await
        .unwrap();
    let realms = identity.realm_set();
    assert!(realms.contains("a2"));
    assert!(realms.contains("a3"));
    assert_eq!(realms.len(), 2);

    // Each provisioned realm got a bootstrap administrator for the
    // creating platform user.
    for realm in ["a2", "a3"] {
        let admin = identity.admin(realm).unwrap();
        assert_eq!(admin.username, "developer");
        assert!(!admin.credential.is_empty());
    }
}

#[tokio::test]
async fn remove_address_space() {
    let identity = Arc::new(InMemoryIdentity::default());
    let manager = manager(identity.clone());

    manager
        .on_update(&[
            space("a1", AuthenticationServiceType::Standard),
            space("a2", AuthenticationServiceType::Standard),
            space("a3", AuthenticationServiceType::Standard),
        ])
        .await
        .unwrap();
    manager
        .on_update(&[
            space("a1", AuthenticationServiceType::Standard),
            space("a3", AuthenticationServiceType::Standard),
        ])
        .await
        .unwrap();

    let realms = identity.realm_set();
    assert!(realms.contains("a1"));
    assert!(!realms.contains("a2"));
    assert!(realms.contains("a3"));
    assert_eq!(realms.len(), 2);
}

#[tokio::test]
async fn auth_type_change_deprovisions_the_realm() {
    let identity = Arc::new(InMemoryIdentity::default());
    let manager = manager(identity.clone());

    manager
        .on_update(&[space("a1", AuthenticationServiceType::Standard)])
        .await
        .unwrap();
    assert_eq!(identity.realm_set().len(), 1);

    manager
        .on_update(&[space("a1", AuthenticationServiceType::None)])
        .await
        .unwrap();
    assert!(identity.realm_set().is_empty());
    assert!(manager.tracked_realms().await.is_empty());
}

#[tokio::test]
async fn realm_carries_console_redirect_uri() {
    let identity = Arc::new(InMemoryIdentity::default());
    let manager = manager(identity.clone());

    manager
        .on_update(&[space("a1", AuthenticationServiceType::Standard)])
        .await
        .unwrap();

    let spec = identity.specs.lock().unwrap().get("a1").cloned().unwrap();
    assert_eq!(spec.namespace, "myns");
    assert_eq!(
        spec.console_redirect_uri.as_deref(),
        Some("https://console.example.com/*")
    );
}

#[tokio::test]
async fn console_churn_does_not_recreate_the_realm() {
    let identity = Arc::new(InMemoryIdentity::default());
    let manager = manager(identity.clone());

    manager
        .on_update(&[space("a1", AuthenticationServiceType::Standard)])
        .await
        .unwrap();

    // Same space, console endpoint gone: not a defining attribute, so the
    // pass must be a no-op for the realm set.
    let mut bare = space("a1", AuthenticationServiceType::Standard);
    bare.status.endpoint_statuses.clear();
    let summary = manager.on_update(&[bare]).await.unwrap();
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.replaced, 0);
    assert_eq!(identity.realm_set().len(), 1);
}

#[tokio::test]
async fn directory_resolved_user_id_is_used() {
    let identity = Arc::new(InMemoryIdentity::default());
    let manager = RealmManager::new(
        identity.clone(),
        Arc::new(StaticDirectory {
            users: HashMap::from([(
                "developer".to_string(),
                "uid-1234".to_string(),
            )]),
        }),
        None,
    );

    manager
        .on_update(&[space("a1", AuthenticationServiceType::Standard)])
        .await
        .unwrap();

    assert_eq!(identity.admin("a1").unwrap().user_id, "uid-1234");
}

#[tokio::test]
async fn preexisting_realms_are_adopted_at_bootstrap() {
    let identity = Arc::new(InMemoryIdentity::default());
    identity.realms.lock().unwrap().insert("a1".to_string());
    let manager = manager(identity.clone());

    let summary = manager
        .on_update(&[space("a1", AuthenticationServiceType::Standard)])
        .await
        .unwrap();
    assert_eq!(summary.unchanged, 1);
    // Adopted, not recreated: no administrator was (re)provisioned.
    assert!(identity.admin("a1").is_none());
}
