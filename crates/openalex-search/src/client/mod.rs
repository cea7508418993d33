//! OpenAlex API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Courtesy `mailto` injection via middleware
//! - Upstream error messages mapped into [`ClientError::Request`]
//!
//! Requests are independent and never retried or cancelled here; callers
//! discard stale responses (see [`crate::generation`]).

mod middleware;

pub use middleware::{CourtesyMiddleware, MAILTO_PARAM};

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{SearchResponse, TopicSuggestion, TopicSuggestionResponse, Work, work_key};
use crate::query::SearchParams;

/// Catalog operations the orchestrator depends on.
#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    /// Search works.
    async fn search(&self, params: &SearchParams) -> ClientResult<SearchResponse>;

    /// Fetch one work by identifier.
    async fn get_work(&self, id: &str) -> ClientResult<Work>;

    /// Best-effort topic suggestions; failures yield an empty list.
    async fn search_topics(&self, prefix: &str) -> Vec<TopicSuggestion>;

    /// Download an externally hosted open access file.
    async fn fetch_open_access_file(&self, url: &str) -> ClientResult<Vec<u8>>;
}

/// OpenAlex API client.
#[derive(Clone)]
pub struct OpenAlexClient {
    /// HTTP client with the courtesy middleware, used for catalog calls.
    client: ClientWithMiddleware,

    /// Plain HTTP client for third-party file hosts.
    files: Client,

    /// API base URL.
    base_url: String,

    /// Courtesy contact.
    mailto: String,
}

impl OpenAlexClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let files = Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let client = ClientBuilder::new(files.clone())
            .with(CourtesyMiddleware::new(config.mailto.clone()))
            .build();

        Ok(Self {
            client,
            files,
            base_url: config.base_url,
            mailto: config.mailto,
        })
    }

    /// Courtesy contact sent with every catalog request.
    #[must_use]
    pub fn mailto(&self) -> &str {
        &self.mailto
    }

    /// Search for works.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search(&self, params: &SearchParams) -> ClientResult<SearchResponse> {
        let url = format!("{}/works", self.base_url);
        let query = params.to_query_pairs();

        tracing::debug!(?query, "Searching works");
        let response: SearchResponse = self.get(&url, &query).await?;
        tracing::debug!(
            count = response.meta.count,
            returned = response.results.len(),
            "Search completed"
        );

        Ok(response)
    }

    /// Get a single work by ID (full OpenAlex URL or bare key).
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_work(&self, id: &str) -> ClientResult<Work> {
        let key = work_key(id);
        if key.is_empty() {
            return Err(ClientError::InvalidUrl(format!("empty work identifier: '{id}'")));
        }

        let url = format!("{}/works/{}", self.base_url, key);
        self.get(&url, &[]).await
    }

    /// Look up topic suggestions for a prefix.
    ///
    /// Suggestions are best-effort: any failure is logged and yields an empty list.
    pub async fn search_topics(&self, prefix: &str) -> Vec<TopicSuggestion> {
        let url = format!("{}/concepts", self.base_url);
        let params = vec![
            ("search".to_string(), prefix.to_string()),
            ("per_page".to_string(), api::TOPIC_SUGGESTION_LIMIT.to_string()),
        ];

        match self.get::<TopicSuggestionResponse>(&url, &params).await {
            Ok(response) => response.results,
            Err(e) => {
                tracing::warn!(prefix, error = %e, "Topic suggestion lookup failed");
                Vec::new()
            }
        }
    }

    /// Download the bytes of an open access file.
    ///
    /// The file host is a third party, so the courtesy contact is not attached.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the download fails.
    pub async fn fetch_open_access_file(&self, url: &str) -> ClientResult<Vec<u8>> {
        let parsed =
            url::Url::parse(url).map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))?;

        tracing::debug!(
            host = parsed.host_str().unwrap_or_default(),
            "Fetching open access file"
        );
        let response = self.files.get(parsed).send().await?;
        let response = handle_response(response).await?;
        let bytes = response.bytes().await?;

        Ok(bytes.to_vec())
    }

    /// Make a GET request against the catalog.
    async fn get<T>(&self, url: &str, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).query(params).send().await?;
        let response = handle_response(response).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(ClientError::from)
    }
}

/// Turn non-2xx responses into [`ClientError::Request`].
async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = upstream_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    });

    tracing::debug!(status = status.as_u16(), %message, "Catalog request failed");
    Err(ClientError::request(status.as_u16(), message))
}

/// Extract the upstream error message from a failure body.
///
/// Prefers the `error` field, then `message`. Unparsable bodies yield `None`.
#[must_use]
pub fn upstream_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    ["error", "message"]
        .iter()
        .filter_map(|field| value.get(field).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

#[async_trait::async_trait]
impl CatalogApi for OpenAlexClient {
    async fn search(&self, params: &SearchParams) -> ClientResult<SearchResponse> {
        Self::search(self, params).await
    }

    async fn get_work(&self, id: &str) -> ClientResult<Work> {
        Self::get_work(self, id).await
    }

    async fn search_topics(&self, prefix: &str) -> Vec<TopicSuggestion> {
        Self::search_topics(self, prefix).await
    }

    async fn fetch_open_access_file(&self, url: &str) -> ClientResult<Vec<u8>> {
        Self::fetch_open_access_file(self, url).await
    }
}

impl std::fmt::Debug for OpenAlexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAlexClient")
            .field("base_url", &self.base_url)
            .field("mailto", &self.mailto)
            .finish()
    }
}
