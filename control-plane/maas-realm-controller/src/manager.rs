use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rand::distr::Alphanumeric;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use maas_models::{
    ANNOTATION_CREATED_BY, AddressSpace, AuthenticationServiceType,
};
use maas_reconcile::{
    AttributeBag, DesiredEntity, PassSummary, ProvisionError, Provisioner,
    ReconcileError, ReconcilerOptions, SetReconciler,
};

use crate::identity::{DirectoryApi, IdentityApi, RealmSpec, RealmUser};

/// Defining attribute of a realm: the space's authentication service
/// type. A change replaces the realm (delete then create); nothing else
/// about a space forces replacement.
pub const ATTR_AUTHENTICATION_SERVICE: &str = "authentication-service";

/// Creation-time inputs that are not defining attributes. Kept out of the
/// compared attribute bag so console or annotation churn never recreates a
/// realm (realm recreation discards its users).
#[derive(Clone, Debug, Default)]
struct RealmContext {
    namespace: String,
    console_redirect_uri: Option<String>,
    created_by: Option<String>,
}

type ContextMap = Arc<RwLock<HashMap<String, RealmContext>>>;

struct RealmProvisioner {
    identity: Arc<dyn IdentityApi>,
    directory: Arc<dyn DirectoryApi>,
    contexts: ContextMap,
}

#[async_trait]
impl Provisioner for RealmProvisioner {
    async fn list_names(&self) -> Result<BTreeSet<String>, ProvisionError> {
        Ok(self.identity.realm_names().await?)
    }

    async fn create(
        &self,
        name: &str,
        _attributes: &AttributeBag,
    ) -> Result<(), ProvisionError> {
        let context = self
            .contexts
            .read()
            .await
            .get(name)
            .cloned()
            .unwrap_or_default();

        let realm = RealmSpec {
            name: name.to_string(),
            namespace: context.namespace,
            console_redirect_uri: context.console_redirect_uri,
        };
        self.identity.create_realm(&realm).await?;
        info!(realm = %name, "created realm");

        // Bootstrap a realm administrator for the platform user that
        // created the space. A failure here fails the create; the realm
        // may already exist downstream and is adopted on the next pass.
        if let Some(username) = context.created_by {
            let user_id = match self.directory.find_user_id(&username).await?
            {
                Some(id) => id,
                None => Uuid::new_v4().to_string(),
            };
            let user = RealmUser {
                username: username.clone(),
                user_id,
                credential: generate_credential(),
            };
            self.identity.create_user(name, &user).await?;
            info!(realm = %name, %username, "created realm administrator");
        } else {
            warn!(realm = %name, "space has no created-by annotation; skipping realm administrator");
        }
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), ProvisionError> {
        self.identity.delete_realm(name).await?;
        info!(realm = %name, "deleted realm");
        Ok(())
    }
}

/// Keeps the identity provider's set of realms in sync with the set of
/// address spaces: one realm per space whose authentication service is
/// `standard`.
pub struct RealmManager {
    reconciler: SetReconciler<RealmProvisioner>,
    contexts: ContextMap,
}

impl RealmManager {
    pub fn new(
        identity: Arc<dyn IdentityApi>,
        directory: Arc<dyn DirectoryApi>,
        pass_deadline: Option<Duration>,
    ) -> Self {
        let contexts: ContextMap = Arc::new(RwLock::new(HashMap::new()));
        let mut options = ReconcilerOptions::new().gate(|e| {
            e.attributes
                .get(ATTR_AUTHENTICATION_SERVICE)
                .is_some_and(|t| {
                    t == AuthenticationServiceType::Standard.as_str()
                })
        });
        if let Some(deadline) = pass_deadline {
            options = options.pass_deadline(deadline);
        }
        let provisioner = RealmProvisioner {
            identity,
            directory,
            contexts: contexts.clone(),
        };
        Self {
            reconciler: SetReconciler::new(provisioner, options),
            contexts,
        }
    }

    /// Reconcile realms against the full, current set of address spaces.
    pub async fn on_update(
        &self,
        spaces: &[AddressSpace],
    ) -> Result<PassSummary, ReconcileError> {
        let mut contexts = HashMap::with_capacity(spaces.len());
        for space in spaces {
            contexts.insert(
                space.name.clone(),
                RealmContext {
                    namespace: space.namespace.clone(),
                    console_redirect_uri: space
                        .endpoint_host("console")
                        .map(|host| format!("https://{host}/*")),
                    created_by: space
                        .annotation(ANNOTATION_CREATED_BY)
                        .map(str::to_string),
                },
            );
        }
        *self.contexts.write().await = contexts;

        let desired: Vec<DesiredEntity> = spaces
            .iter()
            .map(|space| {
                DesiredEntity::new(&space.name).with_attribute(
                    ATTR_AUTHENTICATION_SERVICE,
                    space.authentication_service.service_type.as_str(),
                )
            })
            .collect();
        self.reconciler.on_update(&desired).await
    }

    /// Realm names the manager currently believes exist.
    pub async fn tracked_realms(&self) -> BTreeSet<String> {
        self.reconciler.tracked_names().await
    }
}

fn generate_credential() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}
