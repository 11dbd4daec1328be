use crate::inventory::domain::TenantContext;
use crate::ports::outbound::{ClientFactory, SearchBackend, SearchRequest, SearchResponse};
use crate::shared::{AssetError, AssetResult, BackendError, Collaborator, RequestContext};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// Longest error body kept in a `BackendError::Status`
const MAX_ERROR_BODY_LENGTH: usize = 512;

/// Secret keys holding optional basic-auth credentials for the search cluster
pub const SEARCH_USERNAME_KEY: &str = "OPENSEARCH_USERNAME";
pub const SEARCH_PASSWORD_KEY: &str = "OPENSEARCH_PASSWORD";

#[derive(Debug, Deserialize)]
struct MultiSearchEnvelope {
    #[serde(default)]
    responses: Vec<Value>,
}

/// OpenSearchClient adapter for one tenant's search cluster
///
/// Talks to the OpenSearch/Elasticsearch REST API: `_search` for single
/// queries, `_msearch` (NDJSON) for batches and `_alias/{name}` for alias
/// listing. Every call runs under the caller's [`RequestContext`].
pub struct OpenSearchClient {
    client: reqwest::Client,
    base_url: String,
    basic_auth: Option<(String, String)>,
}

impl OpenSearchClient {
    /// Creates a client for `endpoint`; `https://` is assumed when no scheme
    /// is given.
    pub fn new(
        endpoint: &str,
        timeout: Duration,
        basic_auth: Option<(String, String)>,
    ) -> Result<Self, BackendError> {
        let base_url = Self::normalize_endpoint(endpoint)?;
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("asset-sidecar/{}", version))
            .build()
            .map_err(|e| BackendError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            basic_auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn normalize_endpoint(endpoint: &str) -> Result<String, BackendError> {
        let trimmed = endpoint.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(BackendError::Configuration(
                "search endpoint is empty".to_string(),
            ));
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Ok(trimmed.to_string())
        } else {
            Ok(format!("https://{}", trimmed))
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}/{}", self.base_url, path));
        match &self.basic_auth {
            Some((username, password)) => builder.basic_auth(username, Some(password)),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        builder: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T, BackendError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: Self::truncate_body(body),
            });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::decode(what, e))
    }

    fn truncate_body(mut body: String) -> String {
        if let Some((cut, _)) = body.char_indices().nth(MAX_ERROR_BODY_LENGTH) {
            body.truncate(cut);
        }
        body
    }

    fn to_asset_error(err: BackendError) -> AssetError {
        AssetError::backend(Collaborator::SearchBackend, err)
    }

    /// Encodes `requests` as an `_msearch` NDJSON body
    fn multi_search_body(requests: &[SearchRequest]) -> Result<String, BackendError> {
        let mut body = String::new();
        for request in requests {
            let header = serde_json::json!({ "index": request.index });
            body.push_str(&header.to_string());
            body.push('\n');
            let query = serde_json::to_string(&request.body)
                .map_err(|e| BackendError::decode("multi-search request", e))?;
            body.push_str(&query);
            body.push('\n');
        }
        Ok(body)
    }

    /// Splits an `_msearch` envelope into per-request responses
    fn parse_multi_search(
        envelope: MultiSearchEnvelope,
        expected: usize,
    ) -> Result<Vec<SearchResponse>, BackendError> {
        if envelope.responses.len() != expected {
            return Err(BackendError::decode(
                "multi-search response",
                format!(
                    "expected {} sub-responses, got {}",
                    expected,
                    envelope.responses.len()
                ),
            ));
        }

        envelope
            .responses
            .into_iter()
            .map(|response| {
                if let Some(error) = response.get("error") {
                    let status = response
                        .get("status")
                        .and_then(Value::as_u64)
                        .and_then(|s| u16::try_from(s).ok())
                        .unwrap_or(500);
                    return Err(BackendError::Status {
                        status,
                        body: Self::truncate_body(error.to_string()),
                    });
                }
                SearchResponse::deserialize(&response)
                    .map_err(|e| BackendError::decode("multi-search sub-response", e))
            })
            .collect()
    }
}

#[async_trait]
impl SearchBackend for OpenSearchClient {
    async fn search(
        &self,
        ctx: &RequestContext,
        request: SearchRequest,
    ) -> AssetResult<SearchResponse> {
        let path = format!("{}/_search", urlencoding::encode(&request.index));
        let builder = self
            .request(reqwest::Method::POST, &path)
            .json(&request.body);

        ctx.run(Self::send_json::<SearchResponse>(builder, "search response"))
            .await
            .map_err(Self::to_asset_error)
    }

    async fn multi_search(
        &self,
        ctx: &RequestContext,
        requests: Vec<SearchRequest>,
    ) -> AssetResult<Vec<SearchResponse>> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let body = Self::multi_search_body(&requests).map_err(Self::to_asset_error)?;
        let builder = self
            .request(reqwest::Method::POST, "_msearch")
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(body);

        let envelope = ctx
            .run(Self::send_json::<MultiSearchEnvelope>(
                builder,
                "multi-search response",
            ))
            .await
            .map_err(Self::to_asset_error)?;

        Self::parse_multi_search(envelope, requests.len()).map_err(Self::to_asset_error)
    }

    async fn list_alias_indices(
        &self,
        ctx: &RequestContext,
        alias: &str,
    ) -> AssetResult<Vec<String>> {
        let path = format!("_alias/{}", urlencoding::encode(alias));
        let builder = self.request(reqwest::Method::GET, &path);

        let result = ctx
            .run(Self::send_json::<Map<String, Value>>(builder, "alias listing"))
            .await;

        match result {
            Ok(indices) => {
                let mut names: Vec<String> = indices.into_iter().map(|(name, _)| name).collect();
                names.sort();
                Ok(names)
            }
            Err(BackendError::Status { status: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(Self::to_asset_error(e)),
        }
    }
}

/// OpenSearchClientFactory builds one [`OpenSearchClient`] per tenant
pub struct OpenSearchClientFactory {
    timeout: Duration,
}

impl OpenSearchClientFactory {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ClientFactory for OpenSearchClientFactory {
    type Client = OpenSearchClient;

    async fn create(
        &self,
        _ctx: &RequestContext,
        tenant: &TenantContext,
    ) -> AssetResult<OpenSearchClient> {
        let basic_auth = match (
            tenant.credentials.value(SEARCH_USERNAME_KEY),
            tenant.credentials.value(SEARCH_PASSWORD_KEY),
        ) {
            (Some(username), Some(password)) => Some((username.to_string(), password.to_string())),
            _ => None,
        };

        OpenSearchClient::new(&tenant.search_endpoint, self.timeout, basic_auth)
            .map_err(OpenSearchClient::to_asset_error)
    }
}
