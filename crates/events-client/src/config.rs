//! Client connection settings.

use std::time::Duration;

/// Backend address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Upper bound on any single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the client sends requests and how long it waits for them.
///
/// The base URL is checked when the [`crate::ApiClient`] is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Point the client at `base_url` with the default timeout.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use events_client::ClientConfig;
    ///
    /// let config = ClientConfig::new("http://127.0.0.1:4000")
    ///     .with_timeout(Duration::from_millis(250));
    /// assert_eq!(config.base_url(), "http://127.0.0.1:4000");
    /// assert_eq!(config.timeout(), Duration::from_millis(250));
    /// ```
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replace the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Root every request path is joined onto.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
