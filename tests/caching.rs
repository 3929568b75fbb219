//! Caching gateway and dispatch behavior: read-through policy, cache-key
//! shapes, validation short-circuits, and TTL expiry.

use async_trait::async_trait;
use companies_house_client::{
    CompaniesHouseClient, Error, MemoryCache, Params, Payload, ResultCache,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Wraps a real backend and records every key passed to `set`.
struct RecordingCache {
    inner: MemoryCache,
    set_keys: Mutex<Vec<String>>,
}

impl RecordingCache {
    fn new() -> Self {
        Self {
            inner: MemoryCache::default(),
            set_keys: Mutex::new(Vec::new()),
        }
    }

    fn keys(&self) -> Vec<String> {
        self.set_keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultCache for RecordingCache {
    async fn get(&self, key: &str) -> Option<Payload> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Payload, ttl: Duration) {
        self.set_keys.lock().unwrap().push(key.to_string());
        self.inner.set(key, value, ttl).await;
    }
}

fn client_with_cache(
    server: &mockito::ServerGuard,
    cache: Arc<dyn ResultCache>,
) -> CompaniesHouseClient {
    CompaniesHouseClient::builder("key")
        .base_url(server.url())
        .cache(cache)
        .build()
        .unwrap()
}

#[tokio::test]
async fn second_identical_call_is_served_from_cache() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/company/00000006")
        .with_status(200)
        .with_body(r#"{"company_number":"00000006"}"#)
        .expect(1)
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::new());
    let client = client_with_cache(&server, cache.clone());

    let first = client.get_company("00000006").await.unwrap();
    let second = client.get_company("00000006").await.unwrap();

    assert_eq!(first, second);
    mock.assert_async().await; // exactly one network call
    assert_eq!(cache.keys(), vec!["company_00000006".to_string()]);

    let stats = client.cache_stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.sets, 1);
}

#[tokio::test]
async fn empty_successful_results_are_refetched_every_time() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/company/00000006/charges")
        .with_status(200)
        .with_body("{}")
        .expect(2)
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::new());
    let client = client_with_cache(&server, cache.clone());

    client.get_charges("00000006").await.unwrap();
    client.get_charges("00000006").await.unwrap();

    mock.assert_async().await; // both calls hit the network
    assert!(cache.keys().is_empty(), "empty results must not be cached");
}

#[tokio::test]
async fn errors_are_never_cached() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/company/99999999")
        .with_status(404)
        .with_body("not found")
        .expect(2)
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::new());
    let client = client_with_cache(&server, cache.clone());

    assert!(client.get_company("99999999").await.is_err());
    assert!(client.get_company("99999999").await.is_err());

    mock.assert_async().await;
    assert!(cache.keys().is_empty());
}

#[tokio::test]
async fn missing_search_query_fails_before_any_network_access() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search")
        .expect(0)
        .create_async()
        .await;

    let client = client_with_cache(&server, Arc::new(RecordingCache::new()));
    let err = client.search(Params::new()).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)), "got {err:?}");
    mock.assert_async().await;
}

#[tokio::test]
async fn search_cache_key_is_order_independent() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"total_results":3}"#)
        .expect(1)
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::new());
    let client = client_with_cache(&server, cache.clone());

    let mut forward = Params::new();
    forward.insert("q".into(), "tesco".into());
    forward.insert("items_per_page".into(), "20".into());

    let mut reverse = Params::new();
    reverse.insert("items_per_page".into(), "20".into());
    reverse.insert("q".into(), "tesco".into());

    client.search(forward).await.unwrap();
    client.search(reverse).await.unwrap();

    let keys = cache.keys();
    assert_eq!(keys.len(), 1, "identical queries must share one key");
    assert!(keys[0].starts_with("search_"));
    assert_eq!(keys[0].len(), "search_".len() + 64);
    assert_eq!(client.cache_stats().hits, 1);
}

#[tokio::test]
async fn differing_queries_get_distinct_keys() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"total_results":1}"#)
        .expect(2)
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::new());
    let client = client_with_cache(&server, cache.clone());

    let mut tesco = Params::new();
    tesco.insert("q".into(), "tesco".into());
    let mut sainsbury = Params::new();
    sainsbury.insert("q".into(), "sainsbury".into());

    client.search(tesco).await.unwrap();
    client.search(sainsbury).await.unwrap();

    let keys = cache.keys();
    assert_eq!(keys.len(), 2);
    assert_ne!(keys[0], keys[1]);
}

#[tokio::test]
async fn scalar_search_endpoints_use_the_literal_query_in_the_key() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search/companies")
        .match_query(mockito::Matcher::UrlEncoded("q".into(), "tesco".into()))
        .with_status(200)
        .with_body(r#"{"total_results":2}"#)
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::new());
    let client = client_with_cache(&server, cache.clone());
    client.search_companies("tesco").await.unwrap();

    assert_eq!(cache.keys(), vec!["search_companies_tesco".to_string()]);
}

#[tokio::test]
async fn expired_entries_trigger_a_refetch() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/company/00000006")
        .with_status(200)
        .with_body(r#"{"company_number":"00000006"}"#)
        .expect(2)
        .create_async()
        .await;

    let client = CompaniesHouseClient::builder("key")
        .base_url(server.url())
        .default_ttl(Duration::from_millis(20))
        .build()
        .unwrap();

    client.get_company("00000006").await.unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;
    client.get_company("00000006").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn disabled_cache_always_hits_the_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/company/00000006")
        .with_status(200)
        .with_body(r#"{"company_number":"00000006"}"#)
        .expect(2)
        .create_async()
        .await;

    let client = CompaniesHouseClient::builder("key")
        .base_url(server.url())
        .cache_enabled(false)
        .build()
        .unwrap();

    client.get_company("00000006").await.unwrap();
    client.get_company("00000006").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn two_identifier_endpoints_join_ids_in_the_key() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/company/00000006/charges/ch1")
        .with_status(200)
        .with_body(r#"{"charge_number":1}"#)
        .create_async()
        .await;

    let cache = Arc::new(RecordingCache::new());
    let client = client_with_cache(&server, cache.clone());
    client.get_charge_details("00000006", "ch1").await.unwrap();

    assert_eq!(cache.keys(), vec!["charge_detail_00000006_ch1".to_string()]);
}
