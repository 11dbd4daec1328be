/// Search backend adapters
mod opensearch_client;

pub use opensearch_client::{
    OpenSearchClient, OpenSearchClientFactory, SEARCH_PASSWORD_KEY, SEARCH_USERNAME_KEY,
};
