use crate::inventory::domain::{Policy, TargetType, TargetTypeFilter};
use crate::shared::{AssetResult, RequestContext};
use async_trait::async_trait;

/// PolicyRepository port for the shared relational catalog
///
/// Failures surface as `AssetError::Backend` with collaborator
/// `RelationalBackend`.
#[async_trait]
pub trait PolicyRepository: Send + Sync {
    /// Enabled policies applicable to `target_type`, ordered by policy id
    async fn enabled_policies(&self, ctx: &RequestContext, target_type: &str)
        -> AssetResult<Vec<Policy>>;

    /// Number of policies of any status applicable to `target_type`
    async fn count_policies(&self, ctx: &RequestContext, target_type: &str) -> AssetResult<u64>;

    /// Active target types matching `filter`, ordered by display name
    async fn target_types(
        &self,
        ctx: &RequestContext,
        filter: &TargetTypeFilter,
    ) -> AssetResult<Vec<TargetType>>;

    /// Sources registered as cloud providers
    async fn cloud_providers(&self, ctx: &RequestContext) -> AssetResult<Vec<String>>;
}
