use crate::cache::{CacheStats, Gateway, ResultCache};
use crate::catalog::{self, Endpoint};
use crate::error::Error;
use crate::request::{HttpRequest, Params, Payload};
use crate::transport::HttpClient;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Typed client for the Companies House public data API.
///
/// Every endpoint method resolves through one generic dispatch path: look
/// up the endpoint definition, validate caller input, build the URL and
/// cache key, then fetch through the caching gateway. Calls are fully
/// independent of each other; the only shared state is the cache.
pub struct CompaniesHouseClient {
    base_url: Url,
    gateway: Gateway,
}

impl std::fmt::Debug for CompaniesHouseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompaniesHouseClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl CompaniesHouseClient {
    pub fn builder(api_key: impl Into<String>) -> crate::client::ClientBuilder {
        crate::client::ClientBuilder::new(api_key)
    }

    pub(crate) fn new(
        base_url: Url,
        transport: HttpClient,
        cache: Arc<dyn ResultCache>,
        default_ttl: Duration,
    ) -> Self {
        Self {
            base_url,
            gateway: Gateway::with_default_ttl(transport, cache, default_ttl),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Cache hit/miss/store counters for this client.
    pub fn cache_stats(&self) -> CacheStats {
        self.gateway.stats()
    }

    /// Generic dispatch: one call, one request descriptor, one cache key.
    ///
    /// The typed endpoint methods are thin wrappers over this; it is public
    /// so callers can drive the catalog directly (custom TTLs included).
    pub async fn call(
        &self,
        endpoint: Endpoint,
        ids: &[&str],
        params: Params,
        ttl: Option<Duration>,
    ) -> Result<Payload> {
        let def = catalog::def(endpoint);
        def.validate(ids, &params)?;

        let url = def.build_url(&self.base_url, ids)?;
        let key = def.cache_key(ids, &params);
        debug!(endpoint = ?endpoint, url = %url, key = %key, "dispatching");

        let mut request = HttpRequest::new(url, def.method)
            .with_params(params)
            .with_format(def.format);
        if let Some(accept) = def.accept {
            request = request.with_accept(accept);
        }

        self.gateway.fetch(&key, &request, ttl).await
    }

    /// Dispatch and unwrap a JSON payload.
    pub(crate) async fn execute_json(
        &self,
        endpoint: Endpoint,
        ids: &[&str],
        params: Params,
        ttl: Option<Duration>,
    ) -> Result<serde_json::Value> {
        match self.call(endpoint, ids, params, ttl).await? {
            Payload::Json(value) => Ok(value),
            Payload::Text(text) => serde_json::from_str(&text).map_err(Error::decode),
            Payload::Binary(_) => Err(Error::validation(
                "endpoint returned a binary payload where JSON was expected",
            )),
        }
    }
}
