//! Request descriptors and response payloads.
//!
//! An [`HttpRequest`] is an immutable description of one outbound call:
//! absolute URL, verb, parameter map, declared response format, and the
//! Accept header. It carries no connection state; the transport consumes it
//! by reference and performs exactly one network attempt.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Default Accept header when a request does not override it.
pub const DEFAULT_ACCEPT: &str = "application/json";

/// HTTP verbs the client understands.
///
/// Whether a verb may carry a request body is a fixed property of the verb,
/// encoded in [`HttpMethod::allows_body`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Options,
    Trace,
    Post,
    Put,
    Patch,
    Delete,
    Connect,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Connect => "CONNECT",
        }
    }

    /// Fixed verb-to-body table: GET, HEAD, OPTIONS and TRACE never carry a
    /// body; POST, PUT, PATCH, DELETE and CONNECT may.
    pub fn allows_body(&self) -> bool {
        match self {
            HttpMethod::Get | HttpMethod::Head | HttpMethod::Options | HttpMethod::Trace => false,
            HttpMethod::Post
            | HttpMethod::Put
            | HttpMethod::Patch
            | HttpMethod::Delete
            | HttpMethod::Connect => true,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
            HttpMethod::Trace => reqwest::Method::TRACE,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Connect => reqwest::Method::CONNECT,
        }
    }
}

/// How the response body should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Text,
    Binary,
}

/// A single query/body parameter value: a scalar or a list of scalars.
///
/// Serializes untagged, so a parameter map round-trips as a plain JSON
/// object (`{"q": "tesco", "items_per_page": "20"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Scalar(s) => s.is_empty(),
            ParamValue::List(items) => items.is_empty(),
        }
    }

    /// Flatten into one `(key, value)` pair per scalar, repeating the key
    /// for list values.
    fn pairs<'a>(&'a self, key: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        let values: Vec<&str> = match self {
            ParamValue::Scalar(s) => vec![s.as_str()],
            ParamValue::List(items) => items.iter().map(String::as_str).collect(),
        };
        values.into_iter().map(move |v| (key, v))
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(s) => Some(s.as_str()),
            ParamValue::List(_) => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Scalar(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Scalar(s)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::List(items)
    }
}

/// Ordered parameter map. BTreeMap keeps canonical JSON stable regardless
/// of insertion order, which the cache-key hash depends on.
pub type Params = BTreeMap<String, ParamValue>;

/// URL-encode a parameter map as `k=v&k=v` (repeated keys for lists).
/// Used both for query strings and for form-encoded bodies.
pub fn form_encode(params: &Params) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        for (k, v) in value.pairs(key) {
            serializer.append_pair(k, v);
        }
    }
    serializer.finish()
}

/// Immutable description of one outbound call.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: Url,
    pub method: HttpMethod,
    pub params: Params,
    pub format: ResponseFormat,
    pub accept: Option<String>,
}

impl HttpRequest {
    pub fn new(url: Url, method: HttpMethod) -> Self {
        Self {
            url,
            method,
            params: Params::new(),
            format: ResponseFormat::Json,
            accept: None,
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(url, HttpMethod::Get)
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Effective Accept header for this request.
    pub fn accept_header(&self) -> &str {
        self.accept.as_deref().unwrap_or(DEFAULT_ACCEPT)
    }
}

/// A successful response value, decoded per the request's declared format.
///
/// Serializable so it can be stored in a [`crate::cache::ResultCache`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
    Binary(Bytes),
}

impl Payload {
    /// An empty payload is treated the same as "no cached value": JSON
    /// null / `{}` / `[]` / `""`, the empty string, or zero bytes.
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Json(value) => match value {
                serde_json::Value::Null => true,
                serde_json::Value::Object(map) => map.is_empty(),
                serde_json::Value::Array(items) => items.is_empty(),
                serde_json::Value::String(s) => s.is_empty(),
                _ => false,
            },
            Payload::Text(s) => s.is_empty(),
            Payload::Binary(bytes) => bytes.is_empty(),
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Raw bytes of the payload, re-serializing JSON values.
    pub fn into_bytes(self) -> Bytes {
        match self {
            Payload::Json(value) => Bytes::from(serde_json::to_vec(&value).unwrap_or_default()),
            Payload::Text(s) => Bytes::from(s),
            Payload::Binary(bytes) => bytes,
        }
    }
}
