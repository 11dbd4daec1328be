/// Mock implementations for testing
mod counting_factory;
mod mock_policy_repository;
mod mock_search_backend;
mod static_clients;

pub use counting_factory::CountingFactory;
pub use mock_policy_repository::MockPolicyRepository;
pub use mock_search_backend::MockSearchBackend;
pub use static_clients::StaticClients;
