//! # companies-house-client
//!
//! Typed async client for the Companies House public data API with
//! transparent caching of successful results.
//!
//! ## Overview
//!
//! Around thirty endpoints (company profiles, officers, filing history,
//! charges, PSC records, search, documents) resolve through one generic
//! request pipeline: a static endpoint catalog drives URL construction,
//! caller validation and cache-key construction; the transport executes
//! exactly one HTTPS round trip per call; a read-through gateway serves
//! repeated identical calls from a pluggable key/value cache with TTL.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use companies_house_client::CompaniesHouseClient;
//!
//! #[tokio::main]
//! async fn main() -> companies_house_client::Result<()> {
//!     let client = CompaniesHouseClient::builder("your-api-key").build()?;
//!
//!     let profile = client.get_company("00000006").await?;
//!     println!("{}", profile["company_name"]);
//!
//!     let hits = client.search_companies("tesco").await?;
//!     println!("{} matches", hits["total_results"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Module organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder, and the typed endpoint methods |
//! | [`catalog`] | Static endpoint table driving dispatch |
//! | [`transport`] | HTTP execution: auth, headers, bodies, status mapping |
//! | [`cache`] | Read-through gateway and cache backends |
//! | [`request`] | Request descriptors and response payloads |
//!
//! ## Errors
//!
//! Every call resolves to one value or exactly one [`Error`]:
//! `Validation` (bad caller input, pre-network), `Transport` (no status
//! observed), `Response` (status >= 400 with the raw body), or `Decode`
//! (2xx body failed to parse under the declared format). Nothing is
//! retried or logged away internally.

pub mod cache;
pub mod catalog;
pub mod client;
pub mod error;
pub mod request;
pub mod transport;

pub use cache::{CacheStats, MemoryCache, NullCache, ResultCache, DEFAULT_TTL};
pub use catalog::Endpoint;
pub use client::{ClientBuilder, CompaniesHouseClient, DEFAULT_BASE_URL};
pub use error::Error;
pub use request::{HttpMethod, HttpRequest, ParamValue, Params, Payload, ResponseFormat};

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;
