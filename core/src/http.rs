//! HTTP exchange types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. `ShortenerClient` builds an
//! `HttpRequest`, hands it to whatever `Transport` is installed, and decodes
//! the `HttpResponse` that comes back. Production code uses the network-backed
//! `UreqTransport`; tests install a fake that serves canned fixtures, so the
//! whole request/decode path runs without touching the network.
//!
//! A transport only reports failures to complete the exchange. A 4xx/5xx
//! response is still a response and must be returned as data; status
//! interpretation belongs to the client.

use std::error::Error;

/// Boxed error produced by a `Transport` that could not complete an exchange.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and already carries the encoded query string, API key
/// included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase accompanying `status`, e.g. `"Unauthorized"`. May be empty.
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Convenience constructor for a response with no headers.
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: reason.into(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Status line in the `"401 Unauthorized"` form, or just the code when
    /// the reason phrase is empty.
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }
}

/// Sends one HTTP request and returns one HTTP response.
///
/// Implementations must be shareable across threads: the client hands the
/// same `Arc<dyn Transport>` to every concurrent caller.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError>;
}
