/// Relational catalog adapters
mod mysql_policy_repository;

pub use mysql_policy_repository::{MySqlPolicyRepository, MySqlPolicyRepositoryFactory};
