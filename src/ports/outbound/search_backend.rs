use crate::shared::{AssetResult, BackendError, RequestContext};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Query DSL helpers
pub mod query {
    use serde_json::{json, Value};

    pub fn term(field: &str, value: &str) -> Value {
        json!({ "term": { field: value } })
    }

    pub fn terms<S: AsRef<str>>(field: &str, values: &[S]) -> Value {
        let values: Vec<&str> = values.iter().map(AsRef::as_ref).collect();
        json!({ "terms": { field: values } })
    }

    pub fn bool_must(clauses: Vec<Value>) -> Value {
        json!({ "bool": { "must": clauses } })
    }
}

/// One search against one index
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub index: String,
    pub body: Map<String, Value>,
}

impl SearchRequest {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            body: Map::new(),
        }
    }

    pub fn query(mut self, query: Value) -> Self {
        self.body.insert("query".to_string(), query);
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.body.insert("size".to_string(), json!(size));
        self
    }

    /// Restricts the returned `_source` to `fields`
    pub fn source(mut self, fields: &[&str]) -> Self {
        self.body.insert("_source".to_string(), json!(fields));
        self
    }

    pub fn aggregation(mut self, name: &str, aggregation: Value) -> Self {
        let aggs = self
            .body
            .entry("aggs".to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(aggs) = aggs {
            aggs.insert(name.to_string(), aggregation);
        }
        self
    }

    pub fn body_json(&self) -> Value {
        Value::Object(self.body.clone())
    }
}

/// A ranked hit with its full document body
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Value,
}

impl SearchHit {
    pub fn new(id: impl Into<String>, source: Value) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }

    /// Decodes the document body into the typed view of one document kind
    pub fn decode<T: DeserializeOwned>(&self, what: &str) -> Result<T, BackendError> {
        T::deserialize(&self.source).map_err(|e| BackendError::decode(what, e))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct SearchHits {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

/// Bucket of a terms aggregation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TermsBucket {
    pub key: String,
    pub doc_count: u64,
}

#[derive(Debug, Deserialize)]
struct TermsAggregation {
    #[serde(default)]
    buckets: Vec<TermsBucket>,
}

/// Result of one search (or one sub-search of a multi-search)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    hits: SearchHits,
    #[serde(default)]
    aggregations: Option<Value>,
}

impl SearchResponse {
    pub fn from_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            hits: SearchHits { hits },
            aggregations: None,
        }
    }

    pub fn with_aggregations(mut self, aggregations: Value) -> Self {
        self.aggregations = Some(aggregations);
        self
    }

    pub fn hits(&self) -> &[SearchHit] {
        &self.hits.hits
    }

    pub fn into_hits(self) -> Vec<SearchHit> {
        self.hits.hits
    }

    /// Decodes every hit as `T`, failing on the first malformed document
    pub fn decode_hits<T: DeserializeOwned>(&self, what: &str) -> Result<Vec<T>, BackendError> {
        self.hits().iter().map(|hit| hit.decode(what)).collect()
    }

    /// Buckets of the terms aggregation `name`; empty when it is absent
    pub fn terms_buckets(&self, name: &str) -> Result<Vec<TermsBucket>, BackendError> {
        match self.aggregations.as_ref().and_then(|aggs| aggs.get(name)) {
            Some(aggregation) => TermsAggregation::deserialize(aggregation)
                .map(|a| a.buckets)
                .map_err(|e| BackendError::decode(format!("aggregation '{}'", name), e)),
            None => Ok(Vec::new()),
        }
    }
}

/// SearchBackend port for a tenant's document search cluster
///
/// All calls run under the caller's [`RequestContext`]. Failures surface as
/// `AssetError::Backend` with collaborator `SearchBackend`.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Single bool/term query returning ranked hits with full bodies
    async fn search(&self, ctx: &RequestContext, request: SearchRequest)
        -> AssetResult<SearchResponse>;

    /// Batched search; one response per request, in request order
    async fn multi_search(
        &self,
        ctx: &RequestContext,
        requests: Vec<SearchRequest>,
    ) -> AssetResult<Vec<SearchResponse>>;

    /// Names of the indices behind `alias`; empty when the alias is unknown
    async fn list_alias_indices(&self, ctx: &RequestContext, alias: &str)
        -> AssetResult<Vec<String>>;
}
