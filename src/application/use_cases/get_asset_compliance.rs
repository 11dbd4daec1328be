use crate::application::dto::AssetRequest;
use crate::inventory::domain::{ComplianceResult, FindingStatus, UnmanagedReason};
use crate::inventory::services::ComplianceScorer;
use crate::ports::outbound::search_documents::FINDING_FIELDS;
use crate::ports::outbound::{
    query, FindingDocument, PolicyRepository, SearchBackend, SearchRequest, TenantClients,
};
use crate::shared::{AssetError, AssetResult, Collaborator, RequestContext};

/// Upper bound on findings fetched for one asset
const MAX_FINDINGS: usize = 1000;

/// GetAssetComplianceUseCase - Scores one asset against its target type's
/// enabled policies
///
/// # Type Parameters
/// * `S` - per-tenant search clients
/// * `P` - per-tenant policy repositories
pub struct GetAssetComplianceUseCase<S, P> {
    search_clients: S,
    policy_clients: P,
    findings_index: String,
}

impl<S, P> GetAssetComplianceUseCase<S, P>
where
    S: TenantClients,
    S::Client: SearchBackend,
    P: TenantClients,
    P::Client: PolicyRepository,
{
    pub fn new(search_clients: S, policy_clients: P, findings_index: impl Into<String>) -> Self {
        Self {
            search_clients,
            policy_clients,
            findings_index: findings_index.into(),
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
    ) -> AssetResult<ComplianceResult> {
        self.score(ctx, request)
            .await
            .map_err(|e| request.annotate(e))
    }

    async fn score(
        &self,
        ctx: &RequestContext,
        request: &AssetRequest,
    ) -> AssetResult<ComplianceResult> {
        let tenant = request.tenant()?;
        let target_type = request.require_target_type()?;
        let asset_id = request.require_asset_id()?;

        let policies_repo = self.policy_clients.client_for(ctx, &tenant).await?;
        let policies = policies_repo.enabled_policies(ctx, target_type).await?;

        if policies.is_empty() {
            let total = policies_repo.count_policies(ctx, target_type).await?;
            let reason = if total == 0 {
                UnmanagedReason::NoPolicies
            } else {
                UnmanagedReason::NoActivePolicies
            };
            tracing::info!(policies = total, "target type is unmanaged");
            return Ok(ComplianceResult::unmanaged(reason));
        }

        let statuses: Vec<&str> = FindingStatus::ACTIONABLE
            .iter()
            .map(|s| s.as_str())
            .collect();
        let search_request = SearchRequest::new(self.findings_index.as_str())
            .query(query::bool_must(vec![
                query::term("_docid.keyword", asset_id),
                query::term("type", "issue"),
                query::terms("issueStatus", &statuses),
            ]))
            .size(MAX_FINDINGS)
            .source(&FINDING_FIELDS);

        let search = self.search_clients.client_for(ctx, &tenant).await?;
        let response = search.search(ctx, search_request).await?;
        let findings = response
            .hits()
            .iter()
            .map(FindingDocument::finding_from_hit)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AssetError::backend(Collaborator::SearchBackend, e))?;

        tracing::debug!(
            policies = policies.len(),
            findings = findings.len(),
            "scoring asset"
        );
        Ok(ComplianceScorer::score(&policies, findings))
    }
}
