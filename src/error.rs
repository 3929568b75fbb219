use thiserror::Error;

/// Unified error type for the client.
///
/// Every call resolves to exactly one successful value or exactly one of
/// these variants; nothing is retried or swallowed internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller input was malformed (missing or empty required parameter,
    /// wrong identifier count). Detected before any network access.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The network layer failed (DNS, TLS, connect, read) before an HTTP
    /// status was observed.
    #[error("transport error: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status >= 400. Redirects are followed
    /// transparently, so 3xx never surfaces here. The body is preserved
    /// verbatim when available.
    #[error("HTTP {status}: {body}")]
    Response { status: u16, body: String },

    /// The status was < 400 but the body failed to parse under the
    /// declared response format.
    #[error("decode error: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub(crate) fn transport(source: reqwest::Error) -> Self {
        Error::Transport { source }
    }

    pub(crate) fn decode(source: serde_json::Error) -> Self {
        Error::Decode { source }
    }

    /// HTTP status code, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
