//! Financial Modeling Prep API client
use std::time::Duration;

use crate::config::Config;
use crate::request::Request;

/// Default upstream API root
pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Default bound on a single upstream request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Handle on the Financial Modeling Prep API.
///
/// Generic over the HTTP backend; see [`Request`].
#[derive(Debug, Clone)]
pub struct FinancialModelingPrep<Client: Request> {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl<Client: Request> FinancialModelingPrep<Client> {
    /// Create a client with the default HTTP backend, no API key, the public
    /// base URL and the default timeout.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build a client from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let client = Self::new()
            .with_base_url(config.base_url.clone())
            .with_timeout(config.upstream_timeout);
        match &config.api_key {
            Some(key) => client.with_key(key.clone()),
            None => client,
        }
    }

    /// Sets the HTTP client for this instance.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Set the API key for this instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use fmp_relay::FinancialModelingPrep;
    ///
    /// let client = FinancialModelingPrep::default().with_key("my_api_key");
    /// assert_eq!(client.api_key(), Some("my_api_key"));
    /// ```
    pub fn with_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API root, e.g. to point at a mirror.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound each upstream request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the API key for this instance.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// API root without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get a reference to the underlying HTTP client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl<Client: Request> Default for FinancialModelingPrep<Client> {
    fn default() -> Self {
        Self::new()
    }
}
