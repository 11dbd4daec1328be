/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod relational;
pub mod search;
pub mod secrets;
pub mod tenancy;
pub mod tenant_config;
