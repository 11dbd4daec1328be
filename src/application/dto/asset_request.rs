use crate::inventory::domain::TenantId;
use crate::shared::{AssetError, AssetResult};

/// AssetRequest - Request DTO addressing one asset of one tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub tenant_id: String,
    pub target_type: String,
    pub asset_id: String,
}

impl AssetRequest {
    pub fn new(
        tenant_id: impl Into<String>,
        target_type: impl Into<String>,
        asset_id: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            target_type: target_type.into(),
            asset_id: asset_id.into(),
        }
    }

    pub fn tenant(&self) -> AssetResult<TenantId> {
        TenantId::new(self.tenant_id.as_str())
    }

    pub fn require_target_type(&self) -> AssetResult<&str> {
        require("target type", &self.target_type)
    }

    pub fn require_asset_id(&self) -> AssetResult<&str> {
        require("asset id", &self.asset_id)
    }

    /// Attaches this request's coordinates to `err`
    pub fn annotate(&self, err: AssetError) -> AssetError {
        err.for_tenant(&self.tenant_id)
            .for_asset(&self.target_type, &self.asset_id)
    }
}

/// AssetGroupRequest - Request DTO for per-group aggregations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetGroupRequest {
    pub tenant_id: String,
    pub asset_group: String,
    pub domain: Option<String>,
}

impl AssetGroupRequest {
    pub fn new(
        tenant_id: impl Into<String>,
        asset_group: impl Into<String>,
        domain: Option<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            asset_group: asset_group.into(),
            domain,
        }
    }

    pub fn tenant(&self) -> AssetResult<TenantId> {
        TenantId::new(self.tenant_id.as_str())
    }

    pub fn require_asset_group(&self) -> AssetResult<&str> {
        require("asset group", &self.asset_group)
    }

    pub fn annotate(&self, err: AssetError) -> AssetError {
        err.for_tenant(&self.tenant_id)
    }
}

fn require<'a>(name: &str, value: &'a str) -> AssetResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AssetError::validation(format!("{} must be present", name)));
    }
    Ok(trimmed)
}
