pub mod compliance;
pub mod finding;
pub mod policy;
pub mod related_asset;
pub mod target_type;
pub mod tenant;

pub use compliance::{
    ComplianceResult, Coverage, EvaluationStatus, PolicyEvaluation, SeverityCount,
    UnmanagedReason,
};
pub use finding::{Finding, FindingStatus};
pub use policy::{Policy, Severity};
pub use related_asset::{AssetIdentity, DocumentFields, RelatedAssetNode};
pub use target_type::{is_all_sources_group, AssetStateCount, TargetType, TargetTypeFilter};
pub use tenant::{Credentials, RelationalCredentials, TenantBackendConfig, TenantContext, TenantId};
