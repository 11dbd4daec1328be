use crate::application::dto::AssetGroupRequest;
use crate::inventory::domain::{
    is_all_sources_group, AssetStateCount, TargetType, TargetTypeFilter, TenantId,
};
use crate::ports::outbound::{
    query, PolicyRepository, SearchBackend, SearchRequest, TenantClients,
};
use crate::shared::{AssetError, AssetResult, Collaborator, RequestContext};
use serde_json::json;

/// Name of the state aggregation in the search request
const STATE_AGGREGATION: &str = "name";

/// Upper bound on distinct states returned
const MAX_STATES: usize = 1000;

/// GetAssetStateCountsUseCase - Counts the assets of an asset group per
/// lifecycle state
pub struct GetAssetStateCountsUseCase<S, P> {
    search_clients: S,
    policy_clients: P,
}

impl<S, P> GetAssetStateCountsUseCase<S, P>
where
    S: TenantClients,
    S::Client: SearchBackend,
    P: TenantClients,
    P::Client: PolicyRepository,
{
    pub fn new(search_clients: S, policy_clients: P) -> Self {
        Self {
            search_clients,
            policy_clients,
        }
    }

    #[tracing::instrument(
        skip(self, ctx, request),
        fields(
            request_id = %ctx.request_id(),
            tenant = %request.tenant_id,
            asset_group = %request.asset_group,
        )
    )]
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        request: &AssetGroupRequest,
    ) -> AssetResult<Vec<AssetStateCount>> {
        self.count(ctx, request)
            .await
            .map_err(|e| request.annotate(e))
    }

    async fn count(
        &self,
        ctx: &RequestContext,
        request: &AssetGroupRequest,
    ) -> AssetResult<Vec<AssetStateCount>> {
        let tenant = request.tenant()?;
        let asset_group = request.require_asset_group()?;

        let target_types = self
            .target_types_for_group(ctx, &tenant, asset_group, request.domain.clone())
            .await?;
        if target_types.is_empty() {
            return Err(AssetError::not_found(format!(
                "no valid target types found for asset group '{}'",
                asset_group
            ))
            .with_collaborator(Collaborator::RelationalBackend));
        }
        let names: Vec<&str> = target_types.iter().map(|t| t.name.as_str()).collect();
        tracing::debug!(target_types = names.len(), "counting asset states");

        let search_request = SearchRequest::new(asset_group)
            .query(query::bool_must(vec![
                query::term("_entity", "true"),
                query::term("latest", "true"),
                query::terms("_entitytype.keyword", &names),
            ]))
            .size(0)
            .aggregation(
                STATE_AGGREGATION,
                json!({"terms": {"field": "_assetState.keyword", "size": MAX_STATES}}),
            );

        let search = self.search_clients.client_for(ctx, &tenant).await?;
        let response = search.search(ctx, search_request).await?;
        let buckets = response
            .terms_buckets(STATE_AGGREGATION)
            .map_err(|e| AssetError::backend(Collaborator::SearchBackend, e))?;

        Ok(buckets
            .into_iter()
            .map(|bucket| AssetStateCount {
                state_name: bucket.key,
                count: bucket.doc_count,
            })
            .collect())
    }

    /// Resolves the configured target types an asset group covers
    async fn target_types_for_group(
        &self,
        ctx: &RequestContext,
        tenant: &TenantId,
        asset_group: &str,
        domain: Option<String>,
    ) -> AssetResult<Vec<TargetType>> {
        let repository = self.policy_clients.client_for(ctx, tenant).await?;

        let providers = repository.cloud_providers(ctx).await?;
        if providers.iter().any(|p| p == asset_group) {
            return repository
                .target_types(ctx, &TargetTypeFilter::for_provider(asset_group))
                .await;
        }

        if is_all_sources_group(asset_group) {
            return repository.target_types(ctx, &TargetTypeFilter::all()).await;
        }

        let search = self.search_clients.client_for(ctx, tenant).await?;
        let indices = search.list_alias_indices(ctx, asset_group).await?;
        if indices.is_empty() {
            return Err(AssetError::not_found(format!(
                "no asset types for asset group '{}'",
                asset_group
            ))
            .with_collaborator(Collaborator::SearchBackend));
        }

        let names = indices.iter().map(|index| type_from_index(index)).collect();
        repository
            .target_types(ctx, &TargetTypeFilter::for_names(names).with_domain(domain))
            .await
    }
}

/// Strips the `<source>_` prefix of an index name
fn type_from_index(index: &str) -> String {
    match index.split_once('_') {
        Some((_, rest)) if !rest.is_empty() => rest.to_string(),
        _ => index.to_string(),
    }
}
