use crate::inventory::domain::{TenantContext, TenantId};
use crate::shared::{AssetResult, RequestContext};
use async_trait::async_trait;
use std::sync::Arc;

/// ClientFactory port constructing one backend client for a resolved tenant
#[async_trait]
pub trait ClientFactory: Send + Sync {
    type Client: Send + Sync + 'static;

    async fn create(&self, ctx: &RequestContext, tenant: &TenantContext)
        -> AssetResult<Self::Client>;
}

#[async_trait]
impl<F: ClientFactory + ?Sized> ClientFactory for Arc<F> {
    type Client = F::Client;

    async fn create(
        &self,
        ctx: &RequestContext,
        tenant: &TenantContext,
    ) -> AssetResult<Self::Client> {
        (**self).create(ctx, tenant).await
    }
}

/// TenantClients port handing out the shared client of a tenant
///
/// Implemented by the client cache; use cases depend on this port only.
#[async_trait]
pub trait TenantClients: Send + Sync {
    type Client: Send + Sync + 'static;

    async fn client_for(
        &self,
        ctx: &RequestContext,
        tenant_id: &TenantId,
    ) -> AssetResult<Arc<Self::Client>>;
}

#[async_trait]
impl<T: TenantClients + ?Sized> TenantClients for Arc<T> {
    type Client = T::Client;

    async fn client_for(
        &self,
        ctx: &RequestContext,
        tenant_id: &TenantId,
    ) -> AssetResult<Arc<Self::Client>> {
        (**self).client_for(ctx, tenant_id).await
    }
}
