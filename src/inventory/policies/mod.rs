pub mod related_asset_rules;

pub use related_asset_rules::{
    ChildDocumentRule, RelatedAssetRule, RelatedAssetRules, ScalarExtraRule,
};
