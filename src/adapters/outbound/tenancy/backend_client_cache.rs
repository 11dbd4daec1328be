use super::TenantResolver;
use crate::inventory::domain::TenantId;
use crate::ports::outbound::{ClientFactory, TenantClients};
use crate::shared::{AssetError, AssetResult, RequestContext};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

type ClientCell<C> = Arc<OnceCell<Arc<C>>>;

/// BackendClientCache hands out one lazily-constructed client per tenant.
///
/// Each tenant id maps to a `OnceCell` that is registered in the map before
/// construction starts, so concurrent first callers for the same tenant await
/// one construction instead of racing. A failed construction leaves the cell
/// empty and the next caller retries from scratch.
///
/// # Architecture
/// The cache composes tenant resolution with a [`ClientFactory`] and is
/// exposed to use cases through the [`TenantClients`] port.
pub struct BackendClientCache<F: ClientFactory> {
    resolver: Arc<TenantResolver>,
    factory: F,
    clients: DashMap<TenantId, ClientCell<F::Client>>,
}

impl<F: ClientFactory> BackendClientCache<F> {
    pub fn new(resolver: Arc<TenantResolver>, factory: F) -> Self {
        Self {
            resolver,
            factory,
            clients: DashMap::new(),
        }
    }

    /// Returns the tenant's client, constructing it on first use.
    ///
    /// # Errors
    /// `NotFound` for an unknown tenant; `Backend` when resolution or client
    /// construction fails. Nothing is cached on failure.
    pub async fn get_or_create(
        &self,
        ctx: &RequestContext,
        tenant_id: &TenantId,
    ) -> AssetResult<Arc<F::Client>> {
        if let Some(client) = self
            .clients
            .get(tenant_id)
            .and_then(|cell| cell.value().get().cloned())
        {
            return Ok(client);
        }

        let cell = self.clients.entry(tenant_id.clone()).or_default().clone();

        let result = cell
            .get_or_try_init(|| async {
                let tenant = self.resolver.resolve(ctx, tenant_id).await?;
                let client = self.factory.create(ctx, &tenant).await?;
                tracing::info!(
                    tenant_id = %tenant_id,
                    request_id = %ctx.request_id(),
                    "constructed backend client"
                );
                Ok::<_, AssetError>(Arc::new(client))
            })
            .await;

        match result {
            Ok(client) => Ok(Arc::clone(client)),
            Err(err) => {
                // Only the last holder drops the empty cell; a waiter still
                // holding it may yet initialise it.
                self.clients.remove_if(tenant_id, |_, current| {
                    Arc::ptr_eq(current, &cell)
                        && !current.initialized()
                        && Arc::strong_count(current) == 2
                });
                tracing::warn!(
                    tenant_id = %tenant_id,
                    request_id = %ctx.request_id(),
                    error = %err,
                    "backend client construction failed"
                );
                Err(err.for_tenant(tenant_id.as_str()))
            }
        }
    }

    /// Drops the tenant's client; returns whether one was cached.
    ///
    /// A construction still in flight is left alone so its waiters and the
    /// next caller share the one client it produces.
    pub fn evict(&self, tenant_id: &TenantId) -> bool {
        self.clients
            .remove_if(tenant_id, |_, cell| cell.initialized())
            .is_some()
    }

    /// Drops every cached client; constructions in flight are kept
    pub fn clear(&self) {
        self.clients.retain(|_, cell| !cell.initialized());
    }

    /// Number of tenants with a constructed client
    pub fn len(&self) -> usize {
        self.clients.iter().filter(|e| e.value().initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<F: ClientFactory> TenantClients for BackendClientCache<F> {
    type Client = F::Client;

    async fn client_for(
        &self,
        ctx: &RequestContext,
        tenant_id: &TenantId,
    ) -> AssetResult<Arc<Self::Client>> {
        self.get_or_create(ctx, tenant_id).await
    }
}
