use crate::error::Error;
use crate::request::{form_encode, HttpRequest, Payload, ResponseFormat};
use crate::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Transport configuration supplied at construction.
///
/// `default_headers` are sent on every request and win over the computed
/// Accept header on collision. `cookie_jar` is opaque session persistence;
/// the client never inspects it. `timeout` is likewise passed straight to
/// the underlying transport.
#[derive(Clone, Default)]
pub struct HttpConfig {
    pub api_key: String,
    pub default_headers: Vec<(String, String)>,
    pub cookie_jar: Option<Arc<reqwest::cookie::Jar>>,
    pub timeout: Option<Duration>,
}

/// Executes request descriptors over HTTPS.
///
/// One `send` performs exactly one network attempt; redirects are followed
/// inside the transport and never surface. Authentication is HTTP Basic
/// with the API key as username and an empty password.
pub struct HttpClient {
    client: reqwest::Client,
    api_key: String,
    default_headers: HeaderMap,
    body_content_type: String,
}

impl HttpClient {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(jar) = config.cookie_jar.clone() {
            builder = builder.cookie_provider(jar);
        }

        let client = builder.build().map_err(Error::transport)?;
        let body_content_type = detect_content_type(&config.default_headers);
        let default_headers = build_header_map(&config.default_headers)?;

        Ok(Self {
            client,
            api_key: config.api_key,
            default_headers,
            body_content_type,
        })
    }

    /// Execute one request and decode the response per its declared format.
    pub async fn send(&self, request: &HttpRequest) -> Result<Payload> {
        let mut url = request.url.clone();
        if !request.params.is_empty() && !request.method.allows_body() {
            url.set_query(Some(&form_encode(&request.params)));
        }

        trace!(method = %request.method, url = %url, "sending request");

        // Accept first; configured defaults replace it on collision.
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(request.accept_header())
                .map_err(|e| Error::validation(format!("invalid accept header: {}", e)))?,
        );
        for (name, value) in &self.default_headers {
            headers.insert(name, value.clone());
        }

        let mut body: Option<Vec<u8>> = None;
        if !request.params.is_empty() && request.method.allows_body() {
            let encoded = if self.body_content_type == JSON_CONTENT_TYPE {
                serde_json::to_vec(&request.params).map_err(Error::decode)?
            } else {
                form_encode(&request.params).into_bytes()
            };
            // Content-Type/Content-Length are ours once a body is injected.
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_str(&self.body_content_type)
                    .unwrap_or(HeaderValue::from_static(FORM_CONTENT_TYPE)),
            );
            headers.insert(CONTENT_LENGTH, HeaderValue::from(encoded.len() as u64));
            body = Some(encoded);
        }

        let mut req = self
            .client
            .request(request.method.into(), url.clone())
            .basic_auth(&self.api_key, Some(""))
            .headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }

        let response = req.send().await.map_err(Error::transport)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %url, "response received");

        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Response {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(Error::transport)?;
        match request.format {
            ResponseFormat::Json => serde_json::from_slice(&bytes)
                .map(Payload::Json)
                .map_err(Error::decode),
            ResponseFormat::Text => Ok(Payload::Text(
                String::from_utf8_lossy(&bytes).into_owned(),
            )),
            ResponseFormat::Binary => Ok(Payload::Binary(bytes)),
        }
    }
}

fn build_header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::validation(format!("invalid header name \"{}\": {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::validation(format!("invalid header value for {}: {}", name, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Content type used for injected bodies, taken from the configured default
/// headers; form-encoded when none is configured.
fn detect_content_type(headers: &[(String, String)]) -> String {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_else(|| FORM_CONTENT_TYPE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_detection_is_case_insensitive() {
        let headers = vec![("CONTENT-TYPE".to_string(), " application/json".to_string())];
        assert_eq!(detect_content_type(&headers), "application/json");
        assert_eq!(detect_content_type(&[]), FORM_CONTENT_TYPE);
    }

    #[test]
    fn default_headers_parse_into_header_map() {
        let map = build_header_map(&[("Accept".to_string(), "application/xml".to_string())])
            .unwrap();
        assert_eq!(map.get(ACCEPT).unwrap(), "application/xml");
    }

    #[test]
    fn invalid_default_header_is_a_validation_error() {
        let err = build_header_map(&[("bad header".to_string(), "x".to_string())]).unwrap_err();
        assert!(err.is_validation());
    }
}
