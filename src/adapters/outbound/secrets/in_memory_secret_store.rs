use crate::inventory::domain::Credentials;
use crate::ports::outbound::SecretStore;
use crate::shared::{AssetError, AssetResult, BackendError, Collaborator, RequestContext};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// InMemorySecretStore serves secrets registered at construction
#[derive(Debug, Default)]
pub struct InMemorySecretStore {
    secrets: BTreeMap<String, Credentials>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, secret_ref: impl Into<String>, credentials: Credentials) -> Self {
        self.secrets.insert(secret_ref.into(), credentials);
        self
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn resolve_secret(
        &self,
        ctx: &RequestContext,
        secret_ref: &str,
    ) -> AssetResult<Credentials> {
        if ctx.is_cancelled() {
            return Err(AssetError::backend(
                Collaborator::SecretStore,
                BackendError::Cancelled,
            ));
        }
        self.secrets
            .get(secret_ref)
            .cloned()
            .ok_or_else(|| AssetError::not_found(format!("secret '{}' does not exist", secret_ref)))
    }
}
