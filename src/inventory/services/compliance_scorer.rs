use crate::inventory::domain::{
    ComplianceResult, Coverage, EvaluationStatus, Finding, FindingStatus, Policy,
    PolicyEvaluation, Severity, SeverityCount,
};
use std::collections::HashMap;

/// ComplianceScorer service joining a policy catalog with current findings
///
/// Pure business logic: no I/O. The caller handles the empty-catalog case.
pub struct ComplianceScorer;

impl ComplianceScorer {
    /// Scores one asset.
    ///
    /// # Arguments
    /// * `policies` - Non-empty enabled catalog, in reporting order
    /// * `findings` - Current findings in search result order; when two share a
    ///   policy id the later one wins
    pub fn score(policies: &[Policy], findings: Vec<Finding>) -> ComplianceResult {
        let mut by_policy: HashMap<String, Finding> = HashMap::with_capacity(findings.len());
        for finding in findings {
            by_policy.insert(finding.policy_id.clone(), finding);
        }

        let mut severity_counts: HashMap<Severity, usize> = HashMap::new();
        let mut evaluations = Vec::with_capacity(policies.len());
        let mut total_weight: u64 = 0;
        let mut violated_weight: u64 = 0;
        let mut total_violations = 0;

        for policy in policies {
            let finding = by_policy.get(&policy.id);
            let status = match finding.map(|f| f.status) {
                Some(FindingStatus::Open) => EvaluationStatus::Fail,
                Some(FindingStatus::Exempted) => EvaluationStatus::Exempt,
                Some(FindingStatus::Closed) | None => EvaluationStatus::Pass,
            };

            total_weight += policy.severity.weight();
            if status == EvaluationStatus::Fail {
                violated_weight += policy.severity.weight();
                total_violations += 1;
                *severity_counts.entry(policy.severity).or_insert(0) += 1;
            }

            evaluations.push(PolicyEvaluation {
                policy: policy.clone(),
                status,
                issue_id: finding.map(|f| f.issue_id.clone()),
            });
        }

        ComplianceResult {
            evaluations,
            severity_counts: Severity::ALL
                .iter()
                .map(|&severity| SeverityCount {
                    severity,
                    count: severity_counts.get(&severity).copied().unwrap_or(0),
                })
                .collect(),
            total_policies: policies.len(),
            total_violations,
            compliance: Self::compliance_percent(total_weight, violated_weight),
            coverage: Coverage::Managed,
            unmanaged_reason: None,
        }
    }

    /// `floor(100 - violated * 100 / total)`, or 100 when `total` is 0
    pub fn compliance_percent(total_weight: u64, violated_weight: u64) -> u8 {
        if total_weight == 0 {
            return 100;
        }
        let passed = total_weight.saturating_sub(violated_weight);
        // passed <= total, so the quotient is at most 100
        (passed * 100 / total_weight) as u8
    }
}
