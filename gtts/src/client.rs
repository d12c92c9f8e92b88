//! Google Translate TTS client.

use std::sync::Arc;
use std::time::Duration;

use super::{
    error::{Error, Result},
    http::HttpClient,
    speech::SpeechService,
};

/// Default Google Translate base URL.
pub const DEFAULT_BASE_URL: &str = "https://translate.google.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Google Translate TTS client.
///
/// The client is cheap to share: services hold an `Arc` to the same
/// underlying HTTP connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use speechgate_gtts::Client;
///
/// let client = Client::builder().tld("co.kr").build()?;
/// # Ok::<(), speechgate_gtts::Error>(())
/// ```
pub struct Client {
    http: Arc<HttpClient>,
    config: ClientConfig,
}

#[derive(Clone)]
struct ClientConfig {
    base_url: String,
    tld: String,
    timeout: Duration,
}

impl Client {
    /// Creates a client against `translate.google.com`.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Creates a new client builder for more configuration options.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the configured top-level domain.
    pub fn tld(&self) -> &str {
        &self.config.tld
    }

    /// Returns the configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Returns the speech synthesis service.
    pub fn speech(&self) -> SpeechService {
        SpeechService::new(self.http.clone())
    }
}

/// Builder for creating a gTTS client.
pub struct ClientBuilder {
    base_url: Option<String>,
    tld: String,
    timeout: Duration,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            tld: "com".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the Google domain suffix, e.g. `co.kr` for `translate.google.co.kr`.
    ///
    /// Ignored when an explicit base URL is set.
    pub fn tld(mut self, tld: impl Into<String>) -> Self {
        self.tld = tld.into();
        self
    }

    /// Sets a custom base URL, e.g. a local mock server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<Client> {
        if self.tld.is_empty() {
            return Err(Error::Config("tld must be non-empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be positive".to_string()));
        }

        let base_url = match self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://translate.google.{}", self.tld),
        };
        if base_url.is_empty() {
            return Err(Error::Config("base_url must be non-empty".to_string()));
        }

        let http = HttpClient::new(base_url.clone(), self.tld.clone(), self.timeout)?;

        Ok(Client {
            http: Arc::new(http),
            config: ClientConfig {
                base_url,
                tld: self.tld,
                timeout: self.timeout,
            },
        })
    }
}
