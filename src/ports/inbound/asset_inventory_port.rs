use crate::inventory::domain::{AssetStateCount, ComplianceResult, RelatedAssetNode};
use crate::shared::{AssetResult, RequestContext};
use async_trait::async_trait;

/// AssetInventoryPort - Inbound port for the tenant-scoped aggregation layer
///
/// This port defines the interface that front doors (CLI, HTTP handlers)
/// use to query the inventory. Every call is context-aware: cancelling `ctx`
/// aborts all backend calls made on its behalf.
#[async_trait]
pub trait AssetInventoryPort: Send + Sync {
    /// Compliance picture of one asset against its target type's catalog
    ///
    /// # Errors
    /// - `Validation` when any argument is blank
    /// - `NotFound` when the tenant is unknown
    /// - `Backend` when a collaborator fails
    async fn get_asset_compliance(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        target_type: &str,
        asset_id: &str,
    ) -> AssetResult<ComplianceResult>;

    /// First-hop related assets of one asset
    ///
    /// An unsupported target type yields an empty list.
    ///
    /// # Errors
    /// - `Validation` when the tenant or asset id is blank
    /// - `NotFound` when the tenant or the asset document is missing
    /// - `DomainInvariant` when the asset document lacks its native id
    /// - `Backend` when a collaborator fails
    async fn get_related_assets(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        target_type: &str,
        asset_id: &str,
    ) -> AssetResult<Vec<RelatedAssetNode>>;

    /// Asset counts per lifecycle state for an asset group
    ///
    /// # Errors
    /// - `Validation` when the tenant or asset group is blank
    /// - `NotFound` when the group resolves to no target types
    /// - `Backend` when a collaborator fails
    async fn get_asset_state_counts(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        asset_group: &str,
        domain: Option<&str>,
    ) -> AssetResult<Vec<AssetStateCount>>;
}
