use crate::adapters::outbound::relational::MySqlPolicyRepositoryFactory;
use crate::adapters::outbound::search::OpenSearchClientFactory;
use crate::adapters::outbound::secrets::FileSecretStore;
use crate::adapters::outbound::tenancy::{BackendClientCache, TenantResolver};
use crate::adapters::outbound::tenant_config::StaticTenantConfigStore;
use crate::application::AssetInventory;
use crate::config::Settings;
use crate::shared::Result;
use std::sync::Arc;

pub type SearchClients = BackendClientCache<OpenSearchClientFactory>;
pub type PolicyClients = BackendClientCache<MySqlPolicyRepositoryFactory>;
pub type ConfiguredInventory = AssetInventory<SearchClients, PolicyClients>;

/// Factory wiring the file-backed tenant stores, both client caches and the
/// use cases from [`Settings`]
pub struct InventoryFactory;

impl InventoryFactory {
    /// Builds the inventory described by `settings`.
    ///
    /// # Errors
    /// Returns an error when the tenant config file cannot be loaded.
    pub fn create(settings: &Settings) -> Result<ConfiguredInventory> {
        let config_store = StaticTenantConfigStore::from_yaml_file(
            &settings.tenant_config_file,
            &settings.secret_ref_prefix,
        )?;
        tracing::info!(
            tenants = config_store.len(),
            secrets_dir = %settings.secrets_dir.display(),
            "tenant configuration loaded"
        );

        let resolver = Arc::new(TenantResolver::new(
            Arc::new(config_store),
            Arc::new(FileSecretStore::new(&settings.secrets_dir)),
        ));

        let search_clients = Arc::new(BackendClientCache::new(
            Arc::clone(&resolver),
            OpenSearchClientFactory::new(settings.search_timeout),
        ));
        let policy_clients = Arc::new(BackendClientCache::new(
            resolver,
            MySqlPolicyRepositoryFactory::new(
                settings.relational_max_connections,
                settings.relational_acquire_timeout,
            ),
        ));

        Ok(AssetInventory::new(
            search_clients,
            policy_clients,
            &settings.unified_index,
            settings.related_asset_rules.clone(),
        ))
    }
}
