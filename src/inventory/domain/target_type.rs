/// Asset group that selects every configured target type
pub const ALL_SOURCES_GROUPS: [&str; 2] = ["ds-all", "*"];

/// A configured resource kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetType {
    pub name: String,
    pub display_name: String,
    pub category: String,
    pub provider: String,
    pub domain: String,
}

/// Filter for the relational target-type query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetTypeFilter {
    pub provider: Option<String>,
    /// Restrict to these type names; `None` means no restriction
    pub names: Option<Vec<String>>,
    pub domain: Option<String>,
}

impl TargetTypeFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_provider(provider: impl Into<String>) -> Self {
        Self {
            provider: Some(provider.into()),
            ..Self::default()
        }
    }

    pub fn for_names(names: Vec<String>) -> Self {
        Self {
            names: Some(names),
            ..Self::default()
        }
    }

    pub fn with_domain(mut self, domain: Option<String>) -> Self {
        self.domain = domain.filter(|d| !d.trim().is_empty());
        self
    }
}

/// Number of assets in one lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStateCount {
    pub state_name: String,
    pub count: u64,
}

pub fn is_all_sources_group(asset_group: &str) -> bool {
    ALL_SOURCES_GROUPS.contains(&asset_group)
}
