use super::api_response::SUCCESS_MESSAGE;
use crate::inventory::domain::{AssetStateCount, ComplianceResult, RelatedAssetNode};
use serde::Serialize;

/// One policy evaluation as reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyViolationView {
    pub policy_id: String,
    pub policy_name: String,
    pub severity: String,
    pub category: String,
    #[serde(rename = "lastScan")]
    pub last_scan: String,
    pub issue_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityInfoView {
    pub severity: String,
    pub count: usize,
}

/// ComplianceResponse - Compliance picture of one asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResponse {
    pub violations: Vec<PolicyViolationView>,
    pub total_policies: usize,
    pub total_violations: usize,
    pub compliance: u8,
    #[serde(rename = "severityInfo")]
    pub severity_info: Vec<SeverityInfoView>,
    pub coverage: String,
}

impl ComplianceResponse {
    /// Envelope message for `result`: the unmanaged reason when there is one
    pub fn message(result: &ComplianceResult) -> &'static str {
        result
            .unmanaged_reason
            .map(|reason| reason.message())
            .unwrap_or(SUCCESS_MESSAGE)
    }
}

impl From<&ComplianceResult> for ComplianceResponse {
    fn from(result: &ComplianceResult) -> Self {
        Self {
            violations: result
                .evaluations
                .iter()
                .map(|evaluation| PolicyViolationView {
                    policy_id: evaluation.policy.id.clone(),
                    policy_name: evaluation.policy.display_name.clone(),
                    severity: evaluation.policy.severity.as_str().to_string(),
                    category: evaluation.policy.category.clone(),
                    last_scan: evaluation.status.as_str().to_string(),
                    issue_id: evaluation.issue_id.clone().unwrap_or_default(),
                })
                .collect(),
            total_policies: result.total_policies,
            total_violations: result.total_violations,
            compliance: result.compliance,
            severity_info: result
                .severity_counts
                .iter()
                .map(|c| SeverityInfoView {
                    severity: c.severity.as_str().to_string(),
                    count: c.count,
                })
                .collect(),
            coverage: result.coverage.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedAssetView {
    pub asset_type_name: String,
    pub asset_id: String,
    pub asset_type: String,
    pub resource_id: String,
}

impl From<&RelatedAssetNode> for RelatedAssetView {
    fn from(node: &RelatedAssetNode) -> Self {
        Self {
            asset_type_name: node.type_display_name.clone().unwrap_or_default(),
            asset_id: node.asset_id.clone().unwrap_or_default(),
            asset_type: node.asset_type.clone().unwrap_or_default(),
            resource_id: node.resource_id.clone(),
        }
    }
}

/// RelatedAssetsResponse - First-hop related assets of one asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedAssetsResponse {
    pub related_assets: Vec<RelatedAssetView>,
}

impl From<&[RelatedAssetNode]> for RelatedAssetsResponse {
    fn from(nodes: &[RelatedAssetNode]) -> Self {
        Self {
            related_assets: nodes.iter().map(RelatedAssetView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetStateCountView {
    #[serde(rename = "_assetState")]
    pub state_name: String,
    pub count: u64,
}

/// AssetStateCountsResponse - Asset counts per lifecycle state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStateCountsResponse {
    pub asset_state_name_counts: Vec<AssetStateCountView>,
}

impl From<&[AssetStateCount]> for AssetStateCountsResponse {
    fn from(counts: &[AssetStateCount]) -> Self {
        Self {
            asset_state_name_counts: counts
                .iter()
                .map(|c| AssetStateCountView {
                    state_name: c.state_name.clone(),
                    count: c.count,
                })
                .collect(),
        }
    }
}
