use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use maas_reconcile::ProvisionError;

#[derive(Error, Debug, Clone)]
pub enum IdentityError {
    #[error("identity provider request failed: {0}")]
    Request(String),

    #[error("identity provider rejected credentials: {0}")]
    Unauthorized(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<IdentityError> for ProvisionError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Request(msg) => ProvisionError::Network(msg),
            IdentityError::Unauthorized(msg) => {
                ProvisionError::Unauthorized(msg)
            }
            IdentityError::Conflict(msg) => ProvisionError::Conflict(msg),
        }
    }
}

/// Tenant realm to provision in the identity provider.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RealmSpec {
    pub name: String,
    pub namespace: String,
    /// Redirect URI registered for the tenant console client, when the
    /// space exposes a console endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_redirect_uri: Option<String>,
}

/// Bootstrap administrator created inside a freshly provisioned realm.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct RealmUser {
    pub username: String,
    pub user_id: String,
    #[serde(skip_serializing, default)]
    pub credential: String,
}

/// Admin surface of the external identity provider. Interface-only: the
/// provider itself (its storage, its protocol details) is not this
/// component's concern.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    async fn realm_names(&self) -> Result<BTreeSet<String>, IdentityError>;

    async fn create_realm(
        &self,
        realm: &RealmSpec,
    ) -> Result<(), IdentityError>;

    async fn delete_realm(&self, name: &str) -> Result<(), IdentityError>;

    async fn create_user(
        &self,
        realm: &str,
        user: &RealmUser,
    ) -> Result<(), IdentityError>;
}

/// Lookup of platform user identities (the `created-by` annotation names a
/// platform user whose id seeds the realm administrator).
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn find_user_id(
        &self,
        username: &str,
    ) -> Result<Option<String>, IdentityError>;
}

/// Directory resolution is deployment-specific; the default resolves
/// nothing and realm administrators get generated ids.
pub struct NoDirectory;

#[async_trait]
impl DirectoryApi for NoDirectory {
    async fn find_user_id(
        &self,
        username: &str,
    ) -> Result<Option<String>, IdentityError> {
        debug!(%username, "no directory configured; user id not resolved");
        Ok(None)
    }
}

/// Thin REST adapter for an identity provider's admin API.
pub struct HttpIdentityApi {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl HttpIdentityApi {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            base_url,
            token,
            http: reqwest::Client::new(),
        }
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, IdentityError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(IdentityError::Unauthorized(status.to_string()));
        }
        if status == reqwest::StatusCode::CONFLICT {
            return Err(IdentityError::Conflict(status.to_string()));
        }
        if !status.is_success() {
            return Err(IdentityError::Request(format!(
                "unexpected status {status}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl IdentityApi for HttpIdentityApi {
    async fn realm_names(&self) -> Result<BTreeSet<String>, IdentityError> {
        let response = self
            .request(reqwest::Method::GET, "/admin/realms")
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;
        let response = Self::check(response).await?;
        #[derive(Deserialize)]
        struct RealmName {
            name: String,
        }
        let realms: Vec<RealmName> = response
            .json()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;
        Ok(realms.into_iter().map(|r| r.name).collect())
    }

    async fn create_realm(
        &self,
        realm: &RealmSpec,
    ) -> Result<(), IdentityError> {
        let response = self
            .request(reqwest::Method::POST, "/admin/realms")
            .json(realm)
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_realm(&self, name: &str) -> Result<(), IdentityError> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/admin/realms/{name}"),
            )
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    async fn create_user(
        &self,
        realm: &str,
        user: &RealmUser,
    ) -> Result<(), IdentityError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/admin/realms/{realm}/users"),
            )
            .json(&serde_json::json!({
                "username": user.username,
                "user_id": user.user_id,
                "credential": user.credential,
            }))
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }
}
