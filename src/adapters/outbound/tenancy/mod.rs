/// Tenant resolution and per-tenant client caching
mod backend_client_cache;
mod tenant_resolver;

pub use backend_client_cache::BackendClientCache;
pub use tenant_resolver::TenantResolver;
