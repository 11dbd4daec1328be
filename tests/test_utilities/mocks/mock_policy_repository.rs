use asset_sidecar::prelude::*;
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock PolicyRepository serving a fixed catalog
#[derive(Default)]
pub struct MockPolicyRepository {
    pub policies: Vec<Policy>,
    pub policy_count: u64,
    pub target_types: Vec<TargetType>,
    pub providers: Vec<String>,
    pub should_fail: bool,
    filters: Mutex<Vec<TargetTypeFilter>>,
}

impl MockPolicyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, id: &str, severity: Severity) -> Self {
        self.policies.push(Policy::new(
            id,
            format!("Policy {}", id),
            severity,
            "security",
            "ec2",
        ));
        self.policy_count += 1;
        self
    }

    /// Policies that exist but are all disabled
    pub fn with_disabled_policies(mut self, count: u64) -> Self {
        self.policy_count += count;
        self
    }

    pub fn with_target_type(mut self, name: &str, provider: &str) -> Self {
        self.target_types.push(TargetType {
            name: name.to_string(),
            display_name: name.to_uppercase(),
            category: "Compute".to_string(),
            provider: provider.to_string(),
            domain: "Infra".to_string(),
        });
        self
    }

    pub fn with_provider(mut self, provider: &str) -> Self {
        self.providers.push(provider.to_string());
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn target_type_filters(&self) -> Vec<TargetTypeFilter> {
        self.filters.lock().unwrap().clone()
    }

    fn check(&self) -> AssetResult<()> {
        if self.should_fail {
            return Err(AssetError::backend(
                Collaborator::RelationalBackend,
                BackendError::Transport("connection refused by db.internal:3306".to_string()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PolicyRepository for MockPolicyRepository {
    async fn enabled_policies(
        &self,
        _ctx: &RequestContext,
        _target_type: &str,
    ) -> AssetResult<Vec<Policy>> {
        self.check()?;
        Ok(self.policies.clone())
    }

    async fn count_policies(&self, _ctx: &RequestContext, _target_type: &str) -> AssetResult<u64> {
        self.check()?;
        Ok(self.policy_count)
    }

    async fn target_types(
        &self,
        _ctx: &RequestContext,
        filter: &TargetTypeFilter,
    ) -> AssetResult<Vec<TargetType>> {
        self.check()?;
        self.filters.lock().unwrap().push(filter.clone());
        Ok(self
            .target_types
            .iter()
            .filter(|t| {
                filter
                    .provider
                    .as_ref()
                    .map_or(true, |p| p.eq_ignore_ascii_case(&t.provider))
            })
            .filter(|t| filter.names.as_ref().map_or(true, |n| n.contains(&t.name)))
            .cloned()
            .collect())
    }

    async fn cloud_providers(&self, _ctx: &RequestContext) -> AssetResult<Vec<String>> {
        self.check()?;
        Ok(self.providers.clone())
    }
}
