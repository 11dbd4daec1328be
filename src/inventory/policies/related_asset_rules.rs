/// A child document type indexed under a seed asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildDocumentRule {
    /// `docType` of the child documents
    pub doc_type: String,
    /// Field on the child document holding the related resource id
    pub resource_id_field: String,
    /// Asset type the resource is indexed under
    pub asset_type: String,
}

impl ChildDocumentRule {
    pub fn new(doc_type: &str, resource_id_field: &str, asset_type: &str) -> Self {
        Self {
            doc_type: doc_type.to_string(),
            resource_id_field: resource_id_field.to_string(),
            asset_type: asset_type.to_string(),
        }
    }
}

/// A scalar cross-reference field on the seed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarExtraRule {
    pub field: String,
    pub display_name: String,
}

impl ScalarExtraRule {
    pub fn new(field: &str, display_name: &str) -> Self {
        Self {
            field: field.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

/// How to discover the related assets of one target type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedAssetRule {
    pub target_type: String,
    /// Field on the seed document that child documents reference
    pub native_id_field: String,
    pub children: Vec<ChildDocumentRule>,
    pub scalar_extras: Vec<ScalarExtraRule>,
}

impl RelatedAssetRule {
    /// Rule for EC2 instances: security groups, block devices, public IP and
    /// instance profile
    pub fn ec2() -> Self {
        Self {
            target_type: "ec2".to_string(),
            native_id_field: "instanceid".to_string(),
            children: vec![
                ChildDocumentRule::new("ec2_secgroups", "securitygroupid", "sg"),
                ChildDocumentRule::new("ec2_blockdevices", "volumeid", "volume"),
            ],
            scalar_extras: vec![
                ScalarExtraRule::new("publicipaddress", "Public IPs"),
                ScalarExtraRule::new("iaminstanceprofilearn", "Instance Roles"),
            ],
        }
    }

    pub fn child_for(&self, doc_type: &str) -> Option<&ChildDocumentRule> {
        self.children.iter().find(|c| c.doc_type == doc_type)
    }
}

/// RelatedAssetRules policy: the allow-list of target types with related
/// assets and the rule for each
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedAssetRules {
    allow_list: Vec<String>,
    rules: Vec<RelatedAssetRule>,
}

impl RelatedAssetRules {
    /// Builds the rule set.
    ///
    /// # Errors
    /// Returns an error when an allow-listed target type has no rule.
    pub fn new(allow_list: Vec<String>, rules: Vec<RelatedAssetRule>) -> Result<Self, String> {
        if let Some(missing) = allow_list
            .iter()
            .find(|t| !rules.iter().any(|r| &r.target_type == *t))
        {
            return Err(format!(
                "target type '{}' is allow-listed for related assets but has no rule",
                missing
            ));
        }
        Ok(Self { allow_list, rules })
    }

    pub fn allow_list(&self) -> &[String] {
        &self.allow_list
    }

    /// Rule for `target_type`, or `None` when it is not allow-listed
    pub fn rule_for(&self, target_type: &str) -> Option<&RelatedAssetRule> {
        if !self.allow_list.iter().any(|t| t == target_type) {
            return None;
        }
        self.rules.iter().find(|r| r.target_type == target_type)
    }
}

impl Default for RelatedAssetRules {
    fn default() -> Self {
        Self {
            allow_list: vec!["ec2".to_string()],
            rules: vec![RelatedAssetRule::ec2()],
        }
    }
}
