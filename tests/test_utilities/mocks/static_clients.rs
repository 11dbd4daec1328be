use asset_sidecar::prelude::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// TenantClients handing out pre-built clients; unknown tenants are NotFound
pub struct StaticClients<C> {
    clients: HashMap<String, Arc<C>>,
    lookups: AtomicUsize,
}

impl<C> StaticClients<C> {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn with_client(mut self, tenant: &str, client: Arc<C>) -> Self {
        self.clients.insert(tenant.to_string(), client);
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<C: Send + Sync + 'static> TenantClients for StaticClients<C> {
    type Client = C;

    async fn client_for(
        &self,
        _ctx: &RequestContext,
        tenant_id: &TenantId,
    ) -> AssetResult<Arc<C>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.clients
            .get(tenant_id.as_str())
            .cloned()
            .ok_or_else(|| AssetError::not_found(format!("tenant '{}' is not configured", tenant_id)))
    }
}
