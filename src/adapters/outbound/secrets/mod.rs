/// Secret store adapters
mod file_secret_store;
mod in_memory_secret_store;

pub use file_secret_store::FileSecretStore;
pub use in_memory_secret_store::InMemorySecretStore;
