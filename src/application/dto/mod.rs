/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod api_response;
mod asset_request;
mod inventory_responses;

pub use api_response::{ApiResponse, INTERNAL_ERROR_MESSAGE, SUCCESS_MESSAGE};
pub use asset_request::{AssetGroupRequest, AssetRequest};
pub use inventory_responses::{
    AssetStateCountView, AssetStateCountsResponse, ComplianceResponse, PolicyViolationView,
    RelatedAssetView, RelatedAssetsResponse, SeverityInfoView,
};
