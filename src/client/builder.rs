use crate::cache::{MemoryCache, NullCache, ResultCache, DEFAULT_TTL};
use crate::client::core::CompaniesHouseClient;
use crate::error::Error;
use crate::transport::{HttpClient, HttpConfig};
use crate::Result;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Production base URL of the Companies House public data API.
pub const DEFAULT_BASE_URL: &str = "https://api.company-information.service.gov.uk";

/// Builder for [`CompaniesHouseClient`].
///
/// Keep this surface area small and predictable.
pub struct ClientBuilder {
    api_key: String,
    base_url: Option<String>,
    default_headers: Vec<(String, String)>,
    cookie_jar: Option<Arc<reqwest::cookie::Jar>>,
    timeout: Option<Duration>,
    cache: Option<Arc<dyn ResultCache>>,
    cache_enabled: bool,
    default_ttl: Duration,
}

impl ClientBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            default_headers: Vec::new(),
            cookie_jar: None,
            timeout: None,
            cache: None,
            cache_enabled: true,
            default_ttl: DEFAULT_TTL,
        }
    }

    /// Override the base URL (primarily for testing with mock servers).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a header sent on every request. Configured headers win over the
    /// computed Accept header on collision; a configured `Content-Type`
    /// also selects the body encoding for body-bearing verbs.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Opaque session persistence: cookies set by the server are replayed
    /// on subsequent calls through this jar.
    pub fn cookie_jar(mut self, jar: Arc<reqwest::cookie::Jar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Opaque transport-level timeout. The client itself defines none.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a custom cache backend (Redis adapter, shared store, ...).
    /// Default is an in-process [`MemoryCache`].
    pub fn cache(mut self, cache: Arc<dyn ResultCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Disable caching entirely ([`NullCache`]).
    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// TTL applied when an endpoint call does not specify one.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn build(self) -> Result<CompaniesHouseClient> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(raw)
            .map_err(|e| Error::validation(format!("invalid base URL \"{}\": {}", raw, e)))?;

        let transport = HttpClient::new(HttpConfig {
            api_key: self.api_key,
            default_headers: self.default_headers,
            cookie_jar: self.cookie_jar,
            timeout: self.timeout,
        })?;

        let cache: Arc<dyn ResultCache> = match (self.cache_enabled, self.cache) {
            (false, _) => Arc::new(NullCache::new()),
            (true, Some(cache)) => cache,
            (true, None) => Arc::new(MemoryCache::default()),
        };

        Ok(CompaniesHouseClient::new(
            base_url,
            transport,
            cache,
            self.default_ttl,
        ))
    }
}
