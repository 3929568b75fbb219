//! HTTP transport: executes an [`crate::request::HttpRequest`] over the
//! network with auth, header composition, body encoding and status mapping.

mod http;

pub use http::{HttpClient, HttpConfig};
