/// Tenant config store adapters
mod static_tenant_config_store;

pub use static_tenant_config_store::StaticTenantConfigStore;
