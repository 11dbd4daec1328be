//! asset-sidecar - Tenant-scoped aggregation layer for cloud-asset inventory sidecars
//!
//! This library answers three questions about a tenant's inventory: how
//! compliant an asset is with its target type's policies, which resources an
//! asset depends on, and how many assets of a group sit in each lifecycle
//! state. It follows hexagonal architecture and Domain-Driven Design
//! principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`inventory`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Request context, error taxonomy and common utilities
//!
//! # Example
//!
//! ```no_run
//! use asset_sidecar::prelude::*;
//! use std::path::Path;
//!
//! # async fn example() -> Result<()> {
//! let settings = Settings::load(None, Path::new("."))?;
//! let inventory = InventoryFactory::create(&settings)?;
//!
//! let ctx = RequestContext::new().with_timeout(settings.request_timeout);
//! let result = inventory
//!     .get_asset_compliance(&ctx, "acme", "ec2", "i-0abc")
//!     .await;
//!
//! let response = ApiResponse::from_result(result, |compliance| {
//!     ApiResponse::success(ComplianceResponse::from(&compliance))
//! });
//! println!("{}", serde_json::to_string(&response)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod inventory;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::relational::{
        MySqlPolicyRepository, MySqlPolicyRepositoryFactory,
    };
    pub use crate::adapters::outbound::search::{OpenSearchClient, OpenSearchClientFactory};
    pub use crate::adapters::outbound::secrets::{FileSecretStore, InMemorySecretStore};
    pub use crate::adapters::outbound::tenancy::{BackendClientCache, TenantResolver};
    pub use crate::adapters::outbound::tenant_config::StaticTenantConfigStore;
    pub use crate::application::dto::{
        ApiResponse, AssetGroupRequest, AssetRequest, AssetStateCountsResponse,
        ComplianceResponse, RelatedAssetsResponse,
    };
    pub use crate::application::factories::InventoryFactory;
    pub use crate::application::use_cases::{
        GetAssetComplianceUseCase, GetAssetStateCountsUseCase, GetRelatedAssetsUseCase,
    };
    pub use crate::application::AssetInventory;
    pub use crate::config::Settings;
    pub use crate::inventory::domain::{
        AssetIdentity, AssetStateCount, ComplianceResult, Coverage, Credentials,
        EvaluationStatus, Finding, FindingStatus, Policy, RelatedAssetNode,
        RelationalCredentials, Severity, TargetType, TargetTypeFilter, TenantBackendConfig,
        TenantContext, TenantId, UnmanagedReason,
    };
    pub use crate::inventory::policies::{RelatedAssetRule, RelatedAssetRules};
    pub use crate::inventory::services::{ComplianceScorer, RelatedAssetLinker};
    pub use crate::ports::inbound::AssetInventoryPort;
    pub use crate::ports::outbound::{
        ClientFactory, PolicyRepository, SearchBackend, SearchHit, SearchRequest,
        SearchResponse, SecretStore, TenantClients, TenantConfigStore,
    };
    pub use crate::shared::{
        AssetError, AssetResult, BackendError, Collaborator, ErrorKind, ExitCode,
        RequestContext, Result,
    };
}
