/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (tenant config, secrets, search, relational store).
pub mod client_factory;
pub mod policy_repository;
pub mod search_backend;
pub mod search_documents;
pub mod secret_store;
pub mod tenant_config_store;

pub use client_factory::{ClientFactory, TenantClients};
pub use policy_repository::PolicyRepository;
pub use search_backend::{query, SearchBackend, SearchHit, SearchRequest, SearchResponse, TermsBucket};
pub use search_documents::{AssetDocument, AssetIdentityDocument, FindingDocument};
pub use secret_store::SecretStore;
pub use tenant_config_store::TenantConfigStore;
