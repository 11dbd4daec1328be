use crate::application::dto::{AssetGroupRequest, AssetRequest};
use crate::application::use_cases::{
    GetAssetComplianceUseCase, GetAssetStateCountsUseCase, GetRelatedAssetsUseCase,
};
use crate::inventory::domain::{AssetStateCount, ComplianceResult, RelatedAssetNode};
use crate::inventory::policies::RelatedAssetRules;
use crate::ports::inbound::AssetInventoryPort;
use crate::ports::outbound::{PolicyRepository, SearchBackend, TenantClients};
use crate::shared::{AssetResult, RequestContext};
use async_trait::async_trait;
use std::sync::Arc;

/// AssetInventory - The aggregation layer behind [`AssetInventoryPort`]
///
/// Every use case shares the same per-tenant client caches.
pub struct AssetInventory<S, P> {
    compliance: GetAssetComplianceUseCase<Arc<S>, Arc<P>>,
    related_assets: GetRelatedAssetsUseCase<Arc<S>>,
    asset_states: GetAssetStateCountsUseCase<Arc<S>, Arc<P>>,
}

impl<S, P> AssetInventory<S, P>
where
    S: TenantClients + 'static,
    S::Client: SearchBackend,
    P: TenantClients + 'static,
    P::Client: PolicyRepository,
{
    pub fn new(
        search_clients: Arc<S>,
        policy_clients: Arc<P>,
        unified_index: &str,
        rules: RelatedAssetRules,
    ) -> Self {
        Self {
            compliance: GetAssetComplianceUseCase::new(
                Arc::clone(&search_clients),
                Arc::clone(&policy_clients),
                unified_index,
            ),
            related_assets: GetRelatedAssetsUseCase::new(
                Arc::clone(&search_clients),
                rules,
                unified_index,
            ),
            asset_states: GetAssetStateCountsUseCase::new(search_clients, policy_clients),
        }
    }
}

#[async_trait]
impl<S, P> AssetInventoryPort for AssetInventory<S, P>
where
    S: TenantClients + 'static,
    S::Client: SearchBackend,
    P: TenantClients + 'static,
    P::Client: PolicyRepository,
{
    async fn get_asset_compliance(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        target_type: &str,
        asset_id: &str,
    ) -> AssetResult<ComplianceResult> {
        let request = AssetRequest::new(tenant_id, target_type, asset_id);
        self.compliance.execute(ctx, &request).await
    }

    async fn get_related_assets(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        target_type: &str,
        asset_id: &str,
    ) -> AssetResult<Vec<RelatedAssetNode>> {
        let request = AssetRequest::new(tenant_id, target_type, asset_id);
        self.related_assets.execute(ctx, &request).await
    }

    async fn get_asset_state_counts(
        &self,
        ctx: &RequestContext,
        tenant_id: &str,
        asset_group: &str,
        domain: Option<&str>,
    ) -> AssetResult<Vec<AssetStateCount>> {
        let request = AssetGroupRequest::new(tenant_id, asset_group, domain.map(str::to_string));
        self.asset_states.execute(ctx, &request).await
    }
}
