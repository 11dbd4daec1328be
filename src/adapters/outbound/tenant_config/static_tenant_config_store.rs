use crate::inventory::domain::{TenantBackendConfig, TenantId};
use crate::ports::outbound::TenantConfigStore;
use crate::shared::security::{validate_regular_file, MAX_TENANT_CONFIG_SIZE};
use crate::shared::{AssetError, AssetResult, BackendError, Collaborator, RequestContext, Result};
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TenantsFile {
    #[serde(default)]
    tenants: BTreeMap<String, TenantEntry>,
}

#[derive(Debug, Deserialize)]
struct TenantEntry {
    search_endpoint: String,
    #[serde(default)]
    secret_ref: Option<String>,
}

/// StaticTenantConfigStore serves tenant coordinates from a YAML file loaded
/// at startup (or from an in-memory map).
///
/// File layout:
/// ```yaml
/// tenants:
///   acme:
///     search_endpoint: search-acme.internal:9200
///     secret_ref: acme-db   # defaults to <secret_ref_prefix><tenant id>
/// ```
#[derive(Debug)]
pub struct StaticTenantConfigStore {
    tenants: BTreeMap<String, TenantBackendConfig>,
}

impl StaticTenantConfigStore {
    pub fn from_map(tenants: BTreeMap<String, TenantBackendConfig>) -> Self {
        Self { tenants }
    }

    /// Loads the tenant file.
    ///
    /// # Errors
    /// Returns an error if the file is not a regular file, cannot be parsed,
    /// or lists a tenant with a blank search endpoint.
    pub fn from_yaml_file(path: &Path, secret_ref_prefix: &str) -> Result<Self> {
        validate_regular_file(path, "tenant config", MAX_TENANT_CONFIG_SIZE)?;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tenant config file: {}", path.display()))?;
        let file: TenantsFile = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse tenant config file: {}", path.display()))?;

        let mut tenants = BTreeMap::new();
        for (tenant_id, entry) in file.tenants {
            if entry.search_endpoint.trim().is_empty() {
                anyhow::bail!(
                    "Invalid tenant config: tenants.{}.search_endpoint must not be empty",
                    tenant_id
                );
            }
            let secret_ref = entry
                .secret_ref
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| format!("{}{}", secret_ref_prefix, tenant_id));
            tenants.insert(
                tenant_id,
                TenantBackendConfig {
                    search_endpoint: entry.search_endpoint.trim().to_string(),
                    secret_ref,
                },
            );
        }

        tracing::debug!(path = %path.display(), tenants = tenants.len(), "loaded tenant config");
        Ok(Self { tenants })
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

#[async_trait]
impl TenantConfigStore for StaticTenantConfigStore {
    async fn get_tenant_backend_config(
        &self,
        ctx: &RequestContext,
        tenant_id: &TenantId,
    ) -> AssetResult<TenantBackendConfig> {
        if ctx.is_cancelled() {
            return Err(AssetError::backend(
                Collaborator::TenantConfigStore,
                BackendError::Cancelled,
            ));
        }

        self.tenants
            .get(tenant_id.as_str())
            .cloned()
            .ok_or_else(|| {
                AssetError::not_found(format!("tenant '{}' is not configured", tenant_id))
                    .for_tenant(tenant_id.as_str())
            })
    }
}
