//! Configuration for the OpenAlex search client.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the OpenAlex API.
    pub const BASE_URL: &str = "https://api.openalex.org";

    /// Contact address sent as the `mailto` courtesy parameter.
    ///
    /// Requests carrying a contact address are served from the polite pool.
    pub const DEFAULT_MAILTO: &str = "ed@openclaw.ai";

    /// Application name used in the User-Agent header.
    pub const APP_NAME: &str = "OpenAlexSearch";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default page size for work searches.
    pub const DEFAULT_PER_PAGE: u32 = 25;

    /// Largest page size the API accepts.
    pub const MAX_PER_PAGE: u32 = 200;

    /// Number of topic suggestions requested per lookup.
    pub const TOPIC_SUGGESTION_LIMIT: u32 = 10;

    /// Quiet period before a topic suggestion lookup fires.
    pub const SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(300);

    /// Shortest topic input that triggers a lookup.
    pub const MIN_SUGGESTION_INPUT: usize = 2;

    /// Maximum idle connections kept per host.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Client configuration.
///
/// Injected into [`crate::OpenAlexClient`] at construction; nothing here is
/// process-wide state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the catalog API (overridable for mock servers).
    pub base_url: String,

    /// Courtesy contact address. Not a credential.
    pub mailto: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Page size used by the orchestrator.
    pub per_page: u32,

    /// Debounce for topic suggestion lookups.
    pub suggestion_debounce: Duration,
}

impl Config {
    /// Create a configuration against the public API with the given contact.
    #[must_use]
    pub fn new(mailto: impl Into<String>) -> Self {
        Self {
            base_url: api::BASE_URL.to_string(),
            mailto: mailto.into(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            per_page: api::DEFAULT_PER_PAGE,
            suggestion_debounce: api::SUGGESTION_DEBOUNCE,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            mailto: "test@example.org".to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            per_page: api::DEFAULT_PER_PAGE,
            suggestion_debounce: Duration::from_millis(10),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Loads a `.env` file when present, then reads `OPENALEX_BASE_URL` and
    /// `OPENALEX_MAILTO`.
    ///
    /// # Errors
    ///
    /// Returns error if `OPENALEX_BASE_URL` is not a valid URL.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mailto =
            std::env::var("OPENALEX_MAILTO").unwrap_or_else(|_| api::DEFAULT_MAILTO.to_string());
        let mut config = Self::new(mailto);

        if let Ok(base_url) = std::env::var("OPENALEX_BASE_URL") {
            config = config.with_base_url(&base_url)?;
        }

        Ok(config)
    }

    /// Replace the base URL after validating it.
    ///
    /// # Errors
    ///
    /// Returns error if `base_url` does not parse as an absolute URL.
    pub fn with_base_url(mut self, base_url: &str) -> anyhow::Result<Self> {
        let parsed = url::Url::parse(base_url)?;
        self.base_url = parsed.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    /// User-Agent header value carrying the courtesy contact.
    #[must_use]
    pub fn user_agent(&self) -> String {
        format!("{}/{} (mailto:{})", api::APP_NAME, env!("CARGO_PKG_VERSION"), self.mailto)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(api::DEFAULT_MAILTO)
    }
}
