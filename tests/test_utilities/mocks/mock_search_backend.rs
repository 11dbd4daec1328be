use asset_sidecar::prelude::*;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Mock SearchBackend replaying scripted responses and recording requests
#[derive(Default)]
pub struct MockSearchBackend {
    search_responses: Mutex<VecDeque<AssetResult<SearchResponse>>>,
    multi_search_responses: Mutex<VecDeque<Vec<SearchResponse>>>,
    aliases: HashMap<String, Vec<String>>,
    searches: Mutex<Vec<SearchRequest>>,
    multi_searches: Mutex<Vec<Vec<SearchRequest>>>,
}

impl MockSearchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_response(self, response: SearchResponse) -> Self {
        self.search_responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn with_search_error(self, error: BackendError) -> Self {
        self.search_responses
            .lock()
            .unwrap()
            .push_back(Err(AssetError::backend(Collaborator::SearchBackend, error)));
        self
    }

    pub fn with_multi_search_response(self, responses: Vec<SearchResponse>) -> Self {
        self.multi_search_responses
            .lock()
            .unwrap()
            .push_back(responses);
        self
    }

    pub fn with_alias(mut self, alias: &str, indices: &[&str]) -> Self {
        self.aliases.insert(
            alias.to_string(),
            indices.iter().map(|i| i.to_string()).collect(),
        );
        self
    }

    pub fn search_requests(&self) -> Vec<SearchRequest> {
        self.searches.lock().unwrap().clone()
    }

    pub fn multi_search_requests(&self) -> Vec<Vec<SearchRequest>> {
        self.multi_searches.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.searches.lock().unwrap().len() + self.multi_searches.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchBackend for MockSearchBackend {
    async fn search(
        &self,
        ctx: &RequestContext,
        request: SearchRequest,
    ) -> AssetResult<SearchResponse> {
        if ctx.is_cancelled() {
            return Err(AssetError::backend(
                Collaborator::SearchBackend,
                BackendError::Cancelled,
            ));
        }
        self.searches.lock().unwrap().push(request);
        self.search_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SearchResponse::default()))
    }

    async fn multi_search(
        &self,
        ctx: &RequestContext,
        requests: Vec<SearchRequest>,
    ) -> AssetResult<Vec<SearchResponse>> {
        if ctx.is_cancelled() {
            return Err(AssetError::backend(
                Collaborator::SearchBackend,
                BackendError::Cancelled,
            ));
        }
        let count = requests.len();
        self.multi_searches.lock().unwrap().push(requests);
        Ok(self
            .multi_search_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| vec![SearchResponse::default(); count]))
    }

    async fn list_alias_indices(
        &self,
        _ctx: &RequestContext,
        alias: &str,
    ) -> AssetResult<Vec<String>> {
        Ok(self.aliases.get(alias).cloned().unwrap_or_default())
    }
}
