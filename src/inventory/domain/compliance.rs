use super::policy::{Policy, Severity};
use std::fmt;

/// Outcome of one policy against one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationStatus {
    Pass,
    Fail,
    Exempt,
}

impl EvaluationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EvaluationStatus::Pass => "Pass",
            EvaluationStatus::Fail => "Fail",
            EvaluationStatus::Exempt => "Exempt",
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyEvaluation {
    pub policy: Policy,
    pub status: EvaluationStatus,
    pub issue_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityCount {
    pub severity: Severity,
    pub count: usize,
}

/// Whether any policy applies to a target type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Managed,
    Unmanaged,
}

impl Coverage {
    pub fn as_str(self) -> &'static str {
        match self {
            Coverage::Managed => "Managed",
            Coverage::Unmanaged => "Unmanaged",
        }
    }
}

/// Why a target type has no enabled policies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmanagedReason {
    /// No policy of any status exists for the target type
    NoPolicies,
    /// Policies exist but none is enabled
    NoActivePolicies,
}

impl UnmanagedReason {
    pub fn message(self) -> &'static str {
        match self {
            UnmanagedReason::NoPolicies => "There are no policies for this asset type",
            UnmanagedReason::NoActivePolicies => "No active policies monitoring this asset type",
        }
    }
}

/// Compliance picture of one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceResult {
    pub evaluations: Vec<PolicyEvaluation>,
    pub severity_counts: Vec<SeverityCount>,
    pub total_policies: usize,
    pub total_violations: usize,
    pub compliance: u8,
    pub coverage: Coverage,
    pub unmanaged_reason: Option<UnmanagedReason>,
}

impl ComplianceResult {
    /// Result for a target type with an empty catalog
    pub fn unmanaged(reason: UnmanagedReason) -> Self {
        Self {
            evaluations: Vec::new(),
            severity_counts: Severity::ALL
                .iter()
                .map(|&severity| SeverityCount { severity, count: 0 })
                .collect(),
            total_policies: 0,
            total_violations: 0,
            compliance: 100,
            coverage: Coverage::Unmanaged,
            unmanaged_reason: Some(reason),
        }
    }

    pub fn count_for(&self, severity: Severity) -> usize {
        self.severity_counts
            .iter()
            .find(|c| c.severity == severity)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}
