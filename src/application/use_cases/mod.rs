/// Use cases module containing application business logic orchestration
mod get_asset_compliance;
mod get_asset_state_counts;
mod get_related_assets;

pub use get_asset_compliance::GetAssetComplianceUseCase;
pub use get_asset_state_counts::GetAssetStateCountsUseCase;
pub use get_related_assets::GetRelatedAssetsUseCase;
