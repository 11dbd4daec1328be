/// Integration tests for the application layer
mod test_utilities;

use asset_sidecar::prelude::*;
use serde_json::json;
use std::sync::Arc;
use test_utilities::mocks::*;

type TestInventory = AssetInventory<StaticClients<MockSearchBackend>, StaticClients<MockPolicyRepository>>;

struct Fixture {
    inventory: TestInventory,
    search: Arc<MockSearchBackend>,
    policies: Arc<MockPolicyRepository>,
    search_clients: Arc<StaticClients<MockSearchBackend>>,
    policy_clients: Arc<StaticClients<MockPolicyRepository>>,
}

fn fixture(search: MockSearchBackend, policies: MockPolicyRepository) -> Fixture {
    let search = Arc::new(search);
    let policies = Arc::new(policies);
    let search_clients = Arc::new(StaticClients::new().with_client("acme", Arc::clone(&search)));
    let policy_clients =
        Arc::new(StaticClients::new().with_client("acme", Arc::clone(&policies)));
    let inventory = AssetInventory::new(
        Arc::clone(&search_clients),
        Arc::clone(&policy_clients),
        "all-sources",
        RelatedAssetRules::default(),
    );
    Fixture {
        inventory,
        search,
        policies,
        search_clients,
        policy_clients,
    }
}

fn finding_hit(issue_id: &str, policy_id: &str, status: &str) -> SearchHit {
    SearchHit::new(
        issue_id,
        json!({"policyId": policy_id, "issueStatus": status}),
    )
}

fn identity_hit(doc_type: &str, resource_id: &str, doc_id: &str, display: &str) -> SearchHit {
    SearchHit::new(
        doc_id,
        json!({
            "_docid": doc_id,
            "docType": doc_type,
            "_resourceid": resource_id,
            "targettypedisplayname": display
        }),
    )
}

// ============================================================================
// Compliance
// ============================================================================

#[tokio::test]
async fn test_compliance_weighted_score() {
    let f = fixture(
        MockSearchBackend::new().with_search_response(SearchResponse::from_hits(vec![
            finding_hit("issue-1", "P1", "open"),
        ])),
        MockPolicyRepository::new()
            .with_policy("P1", Severity::Critical)
            .with_policy("P2", Severity::Low),
    );

    let result = f
        .inventory
        .get_asset_compliance(&RequestContext::new(), "acme", "ec2", "i-0abc")
        .await
        .unwrap();

    assert_eq!(result.compliance, 9);
    assert_eq!(result.coverage, Coverage::Managed);
    assert_eq!(result.total_policies, 2);
    assert_eq!(result.total_violations, 1);
    assert_eq!(result.evaluations[0].status, EvaluationStatus::Fail);
    assert_eq!(result.evaluations[0].issue_id.as_deref(), Some("issue-1"));
    assert_eq!(result.evaluations[1].status, EvaluationStatus::Pass);
    assert_eq!(result.count_for(Severity::Critical), 1);
    assert_eq!(result.count_for(Severity::Low), 0);
    assert_eq!(result.severity_counts.len(), 4);

    let requests = f.search.search_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].index, "all-sources");
    assert_eq!(
        requests[0].body_json(),
        json!({
            "query": {"bool": {"must": [
                {"term": {"_docid.keyword": "i-0abc"}},
                {"term": {"type": "issue"}},
                {"terms": {"issueStatus": ["open", "exempted"]}}
            ]}},
            "size": 1000,
            "_source": ["policyId", "issueStatus"]
        })
    );
}

#[tokio::test]
async fn test_compliance_exempt_is_not_a_violation() {
    let f = fixture(
        MockSearchBackend::new().with_search_response(SearchResponse::from_hits(vec![
            finding_hit("issue-1", "P1", "exempted"),
        ])),
        MockPolicyRepository::new().with_policy("P1", Severity::High),
    );

    let result = f
        .inventory
        .get_asset_compliance(&RequestContext::new(), "acme", "ec2", "i-0abc")
        .await
        .unwrap();

    assert_eq!(result.compliance, 100);
    assert_eq!(result.total_violations, 0);
    assert_eq!(result.evaluations[0].status, EvaluationStatus::Exempt);
}

#[tokio::test]
async fn test_compliance_last_finding_wins() {
    let f = fixture(
        MockSearchBackend::new().with_search_response(SearchResponse::from_hits(vec![
            finding_hit("issue-1", "P1", "open"),
            finding_hit("issue-2", "P1", "exempted"),
        ])),
        MockPolicyRepository::new().with_policy("P1", Severity::Medium),
    );

    let result = f
        .inventory
        .get_asset_compliance(&RequestContext::new(), "acme", "ec2", "i-0abc")
        .await
        .unwrap();

    assert_eq!(result.evaluations[0].status, EvaluationStatus::Exempt);
    assert_eq!(result.evaluations[0].issue_id.as_deref(), Some("issue-2"));
}

#[tokio::test]
async fn test_compliance_without_policies_is_unmanaged() {
    let f = fixture(MockSearchBackend::new(), MockPolicyRepository::new());

    let result = f
        .inventory
        .get_asset_compliance(&RequestContext::new(), "acme", "lambda", "fn-1")
        .await
        .unwrap();

    assert_eq!(result.coverage, Coverage::Unmanaged);
    assert_eq!(result.compliance, 100);
    assert!(result.evaluations.is_empty());
    assert_eq!(result.unmanaged_reason, Some(UnmanagedReason::NoPolicies));
    assert_eq!(f.search.call_count(), 0);
    assert_eq!(f.search_clients.lookups(), 0);

    let response = ApiResponse::with_message(
        ComplianceResponse::from(&result),
        ComplianceResponse::message(&result),
    );
    assert_eq!(response.message, "There are no policies for this asset type");
}

#[tokio::test]
async fn test_compliance_with_only_disabled_policies() {
    let f = fixture(
        MockSearchBackend::new(),
        MockPolicyRepository::new().with_disabled_policies(3),
    );

    let result = f
        .inventory
        .get_asset_compliance(&RequestContext::new(), "acme", "ec2", "i-0abc")
        .await
        .unwrap();

    assert_eq!(
        result.unmanaged_reason,
        Some(UnmanagedReason::NoActivePolicies)
    );
    assert_eq!(
        ComplianceResponse::message(&result),
        "No active policies monitoring this asset type"
    );
}

#[tokio::test]
async fn test_compliance_blank_input_is_validation_error() {
    let f = fixture(MockSearchBackend::new(), MockPolicyRepository::new());

    for (tenant, target_type, asset) in [("acme", "ec2", " "), ("acme", "", "i-1"), ("", "ec2", "i-1")] {
        let err = f
            .inventory
            .get_asset_compliance(&RequestContext::new(), tenant, target_type, asset)
            .await
            .unwrap_err();
        assert!(matches!(err, AssetError::Validation { .. }));
        assert_eq!(err.kind(), ErrorKind::ClientFacing);
    }
    assert_eq!(f.policy_clients.lookups(), 0);
}

#[tokio::test]
async fn test_compliance_unknown_tenant_is_not_found() {
    let f = fixture(MockSearchBackend::new(), MockPolicyRepository::new());

    let err = f
        .inventory
        .get_asset_compliance(&RequestContext::new(), "globex", "ec2", "i-1")
        .await
        .unwrap_err();

    assert!(matches!(err, AssetError::NotFound { .. }));
    assert_eq!(err.context().tenant_id.as_deref(), Some("globex"));
    assert_eq!(err.context().asset_id.as_deref(), Some("i-1"));
}

#[tokio::test]
async fn test_relational_failure_is_hidden_at_the_boundary() {
    let f = fixture(MockSearchBackend::new(), MockPolicyRepository::with_failure());

    let result = f
        .inventory
        .get_asset_compliance(&RequestContext::new(), "acme", "ec2", "i-1")
        .await;
    let err = result.as_ref().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServerFacing);
    assert_eq!(
        err.context().collaborator,
        Some(Collaborator::RelationalBackend)
    );

    let response = ApiResponse::from_result(result, |r| {
        ApiResponse::success(ComplianceResponse::from(&r))
    });
    let body = serde_json::to_string(&response).unwrap();
    assert!(!body.contains("db.internal"));
    assert_eq!(response.message, "internal server error");
    assert_eq!(response.outcome(), ExitCode::ServerFailure);
    assert!(response.data.violations.is_empty());
}

#[tokio::test]
async fn test_findings_search_failure_is_backend_error() {
    let f = fixture(
        MockSearchBackend::new().with_search_error(BackendError::Status {
            status: 503,
            body: "shard failure on node es-7".to_string(),
        }),
        MockPolicyRepository::new().with_policy("P1", Severity::High),
    );

    let result = f
        .inventory
        .get_asset_compliance(&RequestContext::new(), "acme", "ec2", "i-1")
        .await;
    let err = result.as_ref().unwrap_err();

    assert!(matches!(
        err,
        AssetError::Backend {
            source: BackendError::Status { status: 503, .. },
            ..
        }
    ));
    assert_eq!(err.context().collaborator, Some(Collaborator::SearchBackend));
    assert_eq!(err.context().asset_id.as_deref(), Some("i-1"));
    assert_eq!(f.search.search_requests().len(), 1);

    let response = ApiResponse::from_result(result, |r| {
        ApiResponse::success(ComplianceResponse::from(&r))
    });
    assert_eq!(response.outcome(), ExitCode::ServerFailure);
    assert!(!serde_json::to_string(&response).unwrap().contains("es-7"));
}

#[tokio::test]
async fn test_cancelled_request_aborts_search() {
    let f = fixture(
        MockSearchBackend::new(),
        MockPolicyRepository::new().with_policy("P1", Severity::Low),
    );
    let ctx = RequestContext::new();
    ctx.cancel();

    let err = f
        .inventory
        .get_asset_compliance(&ctx, "acme", "ec2", "i-1")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AssetError::Backend {
            source: BackendError::Cancelled,
            ..
        }
    ));
}

#[tokio::test]
async fn test_malformed_finding_is_backend_decode_error() {
    let f = fixture(
        MockSearchBackend::new().with_search_response(SearchResponse::from_hits(vec![
            finding_hit("issue-1", "P1", "reopened"),
        ])),
        MockPolicyRepository::new().with_policy("P1", Severity::Low),
    );

    let err = f
        .inventory
        .get_asset_compliance(&RequestContext::new(), "acme", "ec2", "i-1")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AssetError::Backend {
            source: BackendError::Decode { .. },
            ..
        }
    ));
}

// ============================================================================
// Related assets
// ============================================================================

#[tokio::test]
async fn test_related_assets_unsupported_type_makes_no_calls() {
    let f = fixture(MockSearchBackend::new(), MockPolicyRepository::new());

    let nodes = f
        .inventory
        .get_related_assets(&RequestContext::new(), "acme", "s3", "bucket-1")
        .await
        .unwrap();

    assert!(nodes.is_empty());
    assert_eq!(f.search.call_count(), 0);
    assert_eq!(f.search_clients.lookups(), 0);
}

#[tokio::test]
async fn test_related_assets_two_rounds() {
    let seed = SearchHit::new(
        "ec2_i-0abc",
        json!({
            "instanceid": "i-0abc",
            "publicipaddress": "54.1.2.3",
            "iaminstanceprofilearn": ""
        }),
    );
    let search = MockSearchBackend::new()
        .with_search_response(SearchResponse::from_hits(vec![seed]))
        .with_multi_search_response(vec![
            SearchResponse::from_hits(vec![SearchHit::new(
                "c1",
                json!({"docType": "ec2_secgroups", "securitygroupid": "sg-1"}),
            )]),
            SearchResponse::from_hits(vec![SearchHit::new(
                "c2",
                json!({"docType": "ec2_blockdevices", "volumeid": "vol-1"}),
            )]),
        ])
        .with_multi_search_response(vec![
            SearchResponse::from_hits(vec![identity_hit("sg", "sg-1", "aws_sg_1", "Security Group")]),
            SearchResponse::from_hits(vec![identity_hit("volume", "vol-1", "aws_vol_1", "Volume")]),
        ]);
    let f = fixture(search, MockPolicyRepository::new());

    let nodes = f
        .inventory
        .get_related_assets(&RequestContext::new(), "acme", "ec2", "ec2_i-0abc")
        .await
        .unwrap();

    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0].resource_id, "sg-1");
    assert_eq!(nodes[0].asset_type.as_deref(), Some("sg"));
    assert_eq!(nodes[0].asset_id.as_deref(), Some("aws_sg_1"));
    assert_eq!(nodes[0].type_display_name.as_deref(), Some("Security Group"));
    assert_eq!(nodes[1].asset_id.as_deref(), Some("aws_vol_1"));
    assert_eq!(nodes[2], RelatedAssetNode::scalar("54.1.2.3", "Public IPs"));

    let seed_request = &f.search.search_requests()[0];
    assert_eq!(
        seed_request.body_json(),
        json!({"query": {"term": {"_id": "ec2_i-0abc"}}, "size": 1})
    );

    let batches = f.search.multi_search_requests();
    assert_eq!(batches.len(), 2);
    assert_eq!(
        batches[0][0].body_json()["query"],
        json!({"bool": {"must": [
            {"term": {"docType.keyword": "ec2_secgroups"}},
            {"term": {"instanceid.keyword": "i-0abc"}}
        ]}})
    );
    assert_eq!(batches[0][1].body_json()["size"], json!(1000));
    assert_eq!(batches[1].len(), 2);
    assert_eq!(
        batches[1][1].body_json()["query"],
        json!({"bool": {"must": [
            {"term": {"docType.keyword": "volume"}},
            {"term": {"_resourceid.keyword": "vol-1"}}
        ]}})
    );
}

#[tokio::test]
async fn test_related_assets_without_children_skips_identity_round() {
    let seed = SearchHit::new("ec2_i-1", json!({"instanceid": "i-1"}));
    let f = fixture(
        MockSearchBackend::new().with_search_response(SearchResponse::from_hits(vec![seed])),
        MockPolicyRepository::new(),
    );

    let nodes = f
        .inventory
        .get_related_assets(&RequestContext::new(), "acme", "ec2", "ec2_i-1")
        .await
        .unwrap();

    assert!(nodes.is_empty());
    assert_eq!(f.search.multi_search_requests().len(), 1);
}

#[tokio::test]
async fn test_related_assets_missing_seed_is_not_found() {
    let f = fixture(MockSearchBackend::new(), MockPolicyRepository::new());

    let err = f
        .inventory
        .get_related_assets(&RequestContext::new(), "acme", "ec2", "ec2_missing")
        .await
        .unwrap_err();

    assert!(matches!(err, AssetError::NotFound { .. }));
    assert_eq!(err.context().target_type.as_deref(), Some("ec2"));
    assert_eq!(err.context().collaborator, Some(Collaborator::SearchBackend));
}

#[tokio::test]
async fn test_related_assets_seed_without_native_id_is_domain_error() {
    let seed = SearchHit::new("ec2_i-1", json!({"region": "us-east-1"}));
    let f = fixture(
        MockSearchBackend::new().with_search_response(SearchResponse::from_hits(vec![seed])),
        MockPolicyRepository::new(),
    );

    let err = f
        .inventory
        .get_related_assets(&RequestContext::new(), "acme", "ec2", "ec2_i-1")
        .await
        .unwrap_err();

    assert!(matches!(err, AssetError::DomainInvariant { .. }));
    assert_eq!(err.kind(), ErrorKind::ServerFacing);
    assert_eq!(err.context().collaborator, Some(Collaborator::SearchBackend));
    assert!(f.search.multi_search_requests().is_empty());
}

// ============================================================================
// Asset state counts
// ============================================================================

fn state_buckets() -> SearchResponse {
    SearchResponse::default().with_aggregations(json!({
        "name": {"buckets": [
            {"key": "running", "doc_count": 12},
            {"key": "stopped", "doc_count": 3}
        ]}
    }))
}

#[tokio::test]
async fn test_asset_states_for_all_sources() {
    let f = fixture(
        MockSearchBackend::new().with_search_response(state_buckets()),
        MockPolicyRepository::new()
            .with_provider("aws")
            .with_target_type("ec2", "aws")
            .with_target_type("s3", "aws"),
    );

    let counts = f
        .inventory
        .get_asset_state_counts(&RequestContext::new(), "acme", "ds-all", None)
        .await
        .unwrap();

    assert_eq!(
        counts,
        vec![
            AssetStateCount {
                state_name: "running".to_string(),
                count: 12
            },
            AssetStateCount {
                state_name: "stopped".to_string(),
                count: 3
            },
        ]
    );
    assert_eq!(f.policies.target_type_filters(), vec![TargetTypeFilter::all()]);

    let request = &f.search.search_requests()[0];
    assert_eq!(request.index, "ds-all");
    assert_eq!(
        request.body_json(),
        json!({
            "query": {"bool": {"must": [
                {"term": {"_entity": "true"}},
                {"term": {"latest": "true"}},
                {"terms": {"_entitytype.keyword": ["ec2", "s3"]}}
            ]}},
            "size": 0,
            "aggs": {"name": {"terms": {"field": "_assetState.keyword", "size": 1000}}}
        })
    );
}

#[tokio::test]
async fn test_asset_states_for_provider_group() {
    let f = fixture(
        MockSearchBackend::new().with_search_response(state_buckets()),
        MockPolicyRepository::new()
            .with_provider("aws")
            .with_provider("azure")
            .with_target_type("ec2", "aws")
            .with_target_type("vm", "azure"),
    );

    f.inventory
        .get_asset_state_counts(&RequestContext::new(), "acme", "azure", None)
        .await
        .unwrap();

    assert_eq!(
        f.policies.target_type_filters(),
        vec![TargetTypeFilter::for_provider("azure")]
    );
    assert_eq!(
        f.search.search_requests()[0].body_json()["query"]["bool"]["must"][2],
        json!({"terms": {"_entitytype.keyword": ["vm"]}})
    );
}

#[tokio::test]
async fn test_asset_states_for_alias_group() {
    let f = fixture(
        MockSearchBackend::new()
            .with_alias("prod-apps", &["aws_ec2", "aws_rds"])
            .with_search_response(state_buckets()),
        MockPolicyRepository::new()
            .with_provider("aws")
            .with_target_type("ec2", "aws"),
    );

    let counts = f
        .inventory
        .get_asset_state_counts(&RequestContext::new(), "acme", "prod-apps", Some("Infra"))
        .await
        .unwrap();

    assert_eq!(counts.len(), 2);
    assert_eq!(
        f.policies.target_type_filters(),
        vec![TargetTypeFilter::for_names(vec!["ec2".to_string(), "rds".to_string()])
            .with_domain(Some("Infra".to_string()))]
    );
}

#[tokio::test]
async fn test_asset_states_unknown_alias_is_not_found() {
    let f = fixture(MockSearchBackend::new(), MockPolicyRepository::new());

    let err = f
        .inventory
        .get_asset_state_counts(&RequestContext::new(), "acme", "nothing", None)
        .await
        .unwrap_err();

    assert!(matches!(err, AssetError::NotFound { .. }));
    assert_eq!(err.context().collaborator, Some(Collaborator::SearchBackend));
    assert_eq!(f.search.search_requests().len(), 0);
}

#[tokio::test]
async fn test_asset_states_without_configured_types_is_not_found() {
    let f = fixture(MockSearchBackend::new(), MockPolicyRepository::new());

    let err = f
        .inventory
        .get_asset_state_counts(&RequestContext::new(), "acme", "*", None)
        .await
        .unwrap_err();

    assert!(matches!(err, AssetError::NotFound { .. }));
    assert_eq!(
        err.context().collaborator,
        Some(Collaborator::RelationalBackend)
    );
}

#[tokio::test]
async fn test_asset_states_blank_group_is_validation_error() {
    let f = fixture(MockSearchBackend::new(), MockPolicyRepository::new());

    let err = f
        .inventory
        .get_asset_state_counts(&RequestContext::new(), "acme", " ", None)
        .await
        .unwrap_err();

    assert!(matches!(err, AssetError::Validation { .. }));
}
