use crate::inventory::domain::{TenantContext, TenantId};
use crate::ports::outbound::{SecretStore, TenantConfigStore};
use crate::shared::{AssetError, AssetResult, BackendError, Collaborator, RequestContext};
use std::sync::Arc;

/// TenantResolver composes the tenant config store and the secret store into
/// a fully resolved [`TenantContext`].
pub struct TenantResolver {
    config_store: Arc<dyn TenantConfigStore>,
    secret_store: Arc<dyn SecretStore>,
}

impl TenantResolver {
    pub fn new(config_store: Arc<dyn TenantConfigStore>, secret_store: Arc<dyn SecretStore>) -> Self {
        Self {
            config_store,
            secret_store,
        }
    }

    /// Resolves backend coordinates and credentials for `tenant_id`.
    ///
    /// # Errors
    /// `NotFound` for an unknown tenant. A tenant whose secret is missing is
    /// a misconfiguration and surfaces as `Backend`.
    pub async fn resolve(
        &self,
        ctx: &RequestContext,
        tenant_id: &TenantId,
    ) -> AssetResult<TenantContext> {
        let config = self
            .config_store
            .get_tenant_backend_config(ctx, tenant_id)
            .await
            .map_err(|e| {
                e.with_collaborator(Collaborator::TenantConfigStore)
                    .for_tenant(tenant_id.as_str())
            })?;

        let credentials = self
            .secret_store
            .resolve_secret(ctx, &config.secret_ref)
            .await
            .map_err(|e| match e {
                AssetError::NotFound { message, .. } => AssetError::backend(
                    Collaborator::SecretStore,
                    BackendError::Configuration(message),
                ),
                other => other.with_collaborator(Collaborator::SecretStore),
            })
            .map_err(|e| e.for_tenant(tenant_id.as_str()))?;

        tracing::debug!(
            tenant_id = %tenant_id,
            search_endpoint = %config.search_endpoint,
            "resolved tenant backend coordinates"
        );

        Ok(TenantContext {
            tenant_id: tenant_id.clone(),
            search_endpoint: config.search_endpoint,
            credentials,
        })
    }
}
