use crate::inventory::domain::{TenantBackendConfig, TenantId};
use crate::shared::{AssetResult, RequestContext};
use async_trait::async_trait;

/// TenantConfigStore port for looking up a tenant's backend coordinates
///
/// # Errors
/// Implementations return `NotFound` for an unknown tenant and `Backend`
/// (collaborator `TenantConfigStore`) when the store itself fails.
#[async_trait]
pub trait TenantConfigStore: Send + Sync {
    async fn get_tenant_backend_config(
        &self,
        ctx: &RequestContext,
        tenant_id: &TenantId,
    ) -> AssetResult<TenantBackendConfig>;
}
