use crate::application::dto::AssetRequest;
use crate::inventory::domain::{AssetIdentity, RelatedAssetNode};
use crate::inventory::policies::{RelatedAssetRule, RelatedAssetRules};
use crate::inventory::services::RelatedAssetLinker;
use crate::ports::outbound::search_documents::IDENTITY_FIELDS;
use crate::ports::outbound::{
    query, AssetDocument, AssetIdentityDocument, SearchBackend, SearchRequest, SearchResponse,
    TenantClients,
};
use crate::shared::{AssetError, AssetResult, BackendError, Collaborator, RequestContext};

/// Upper bound on child documents fetched per child type
const MAX_CHILD_DOCUMENTS: usize = 1000;

/// GetRelatedAssetsUseCase - Resolves the first-hop related assets of one
/// asset in two batched rounds
///
/// Round one finds the child documents of the seed asset, round two resolves
/// the identity of every referenced resource.
pub struct GetRelatedAssetsUseCase<S> {
    search_clients: S,
    rules: RelatedAssetRules,
    index: String,
}

impl<S> GetRelatedAssetsUseCase<S>
where
    S: TenantClients,
    S::Client: SearchBackend,
{
    pub fn new(search_clients: S, rules: RelatedAssetRules, index: impl Into<String>) -> Self {
        Self {
            search_clients,
            rules,
            index: index.into(),
        }
    }

    #[tracing::instrument(
        skip(self, ctx, request),
        fields(
            request_id = %ctx.request_id(),
            tenant = %request.tenant_id,
            target_type = %request.target_type,
            asset = %request.asset_id,
        )
    )]
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        request: &AssetRequest,
    ) -> AssetResult<Vec<RelatedAssetNode>> {
        self.resolve(ctx, request)
            .await
            .map_err(|e| request.annotate(e))
    }

    async fn resolve(
        &self,
        ctx: &RequestContext,
        request: &AssetRequest,
    ) -> AssetResult<Vec<RelatedAssetNode>> {
        let tenant = request.tenant()?;
        let asset_id = request.require_asset_id()?;

        let Some(rule) = self.rules.rule_for(request.target_type.trim()) else {
            tracing::debug!("no related-asset rule for target type");
            return Ok(Vec::new());
        };

        let search = self.search_clients.client_for(ctx, &tenant).await?;
        let index = self.index.as_str();

        let seed_response = search
            .search(
                ctx,
                SearchRequest::new(index)
                    .query(query::term("_id", asset_id))
                    .size(1),
            )
            .await?;
        let seed_hit = seed_response.hits().first().ok_or_else(|| {
            AssetError::not_found(format!("asset '{}' does not exist", asset_id))
                .with_collaborator(Collaborator::SearchBackend)
        })?;
        let seed = AssetDocument::from_hit(seed_hit).map_err(search_error)?;
        let native_id = RelatedAssetLinker::native_id(rule, &seed)
            .map_err(|e| e.with_collaborator(Collaborator::SearchBackend))?;

        let child_responses = search
            .multi_search(ctx, Self::child_requests(index, rule, native_id))
            .await?;
        let children = decode_documents(&child_responses)?;
        let mut nodes = RelatedAssetLinker::classify_children(rule, &children)?;

        if nodes.is_empty() {
            tracing::debug!("no child documents, skipping identity lookup");
        } else {
            let identity_responses = search
                .multi_search(ctx, Self::identity_requests(index, &nodes))
                .await?;
            let identities = decode_identities(&identity_responses)?;
            RelatedAssetLinker::apply_identities(&mut nodes, &identities);
        }

        nodes.extend(RelatedAssetLinker::scalar_extras(rule, &seed));
        tracing::debug!(related = nodes.len(), "related assets resolved");
        Ok(nodes)
    }

    fn child_requests(index: &str, rule: &RelatedAssetRule, native_id: &str) -> Vec<SearchRequest> {
        let foreign_key = format!("{}.keyword", rule.native_id_field);
        rule.children
            .iter()
            .map(|child| {
                SearchRequest::new(index)
                    .query(query::bool_must(vec![
                        query::term("docType.keyword", &child.doc_type),
                        query::term(&foreign_key, native_id),
                    ]))
                    .size(MAX_CHILD_DOCUMENTS)
            })
            .collect()
    }

    fn identity_requests(index: &str, stubs: &[RelatedAssetNode]) -> Vec<SearchRequest> {
        stubs
            .iter()
            .map(|stub| {
                let asset_type = stub.asset_type.as_deref().unwrap_or_default();
                SearchRequest::new(index)
                    .query(query::bool_must(vec![
                        query::term("docType.keyword", asset_type),
                        query::term("_resourceid.keyword", &stub.resource_id),
                    ]))
                    .size(1)
                    .source(&IDENTITY_FIELDS)
            })
            .collect()
    }
}

fn search_error(err: BackendError) -> AssetError {
    AssetError::backend(Collaborator::SearchBackend, err)
}

fn decode_documents(responses: &[SearchResponse]) -> AssetResult<Vec<Vec<AssetDocument>>> {
    responses
        .iter()
        .map(|response| {
            response
                .hits()
                .iter()
                .map(AssetDocument::from_hit)
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(search_error)
}

fn decode_identities(responses: &[SearchResponse]) -> AssetResult<Vec<AssetIdentity>> {
    let mut identities = Vec::new();
    for response in responses {
        let documents: Vec<AssetIdentityDocument> = response
            .decode_hits("asset identity document")
            .map_err(search_error)?;
        identities.extend(documents.into_iter().map(AssetIdentity::from));
    }
    Ok(identities)
}
