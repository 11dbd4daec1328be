pub mod compliance_scorer;
pub mod related_asset_linker;

pub use compliance_scorer::ComplianceScorer;
pub use related_asset_linker::RelatedAssetLinker;
