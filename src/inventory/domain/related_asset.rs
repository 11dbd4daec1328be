/// One node of an asset's first-hop dependency list.
///
/// Child resources start as stubs (resource id + asset type) and gain an asset
/// id and display type name during identity resolution. Scalar extras carry a
/// display name only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelatedAssetNode {
    pub resource_id: String,
    pub asset_type: Option<String>,
    pub asset_id: Option<String>,
    pub type_display_name: Option<String>,
}

impl RelatedAssetNode {
    /// A child resource awaiting identity resolution
    pub fn stub(resource_id: impl Into<String>, asset_type: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            asset_type: Some(asset_type.into()),
            asset_id: None,
            type_display_name: None,
        }
    }

    /// A scalar cross-reference on the seed document
    pub fn scalar(resource_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            asset_type: None,
            asset_id: None,
            type_display_name: Some(display_name.into()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.asset_id.is_some()
    }

    /// True when this stub is the origin of an identity hit
    pub fn matches(&self, asset_type: &str, resource_id: &str) -> bool {
        self.asset_type.as_deref() == Some(asset_type) && self.resource_id == resource_id
    }
}

/// Read access to the string fields of an indexed asset document
pub trait DocumentFields {
    /// Returns the field when it is present as a non-empty string
    fn text(&self, field: &str) -> Option<&str>;
}

/// Canonical identity of an indexed asset, as returned by identity lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetIdentity {
    pub asset_type: String,
    pub resource_id: String,
    pub asset_id: String,
    pub type_display_name: Option<String>,
}
