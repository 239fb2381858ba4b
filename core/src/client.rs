//! Request builder, response decoder, and the shortener client itself.
//!
//! # Design
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a decoder that turns the response body into a value.
//! `shorten`, `expand` and `lookup_analytics` glue the two together through
//! `execute`, the single place where a request meets the transport and a
//! non-2xx status becomes `ShortenerError::Api`. Callers that run their own
//! I/O can use the `build_*` / `parse_*` pairs directly.
//!
//! The transport sits behind a read/write lock so it can be swapped while
//! other threads are issuing requests. Each call clones the `Arc` out of the
//! lock before sending, so an in-flight request finishes on the transport it
//! started with.

use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::debug;
use url::Url;

use crate::config::{self, DEFAULT_BASE_URL};
use crate::error::{Result, ShortenerError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::transport::UreqTransport;
use crate::types::{from_json_object, Analytics, ShortenRequest, UrlDetails};

const BLANK_CONTENT: &str = "expecting non-blank content";

/// Client for the URL shortener API.
///
/// `Send + Sync`; share it behind an `Arc` to use it from several threads.
pub struct ShortenerClient {
    api_key: String,
    base_url: String,
    transport: RwLock<Option<Arc<dyn Transport>>>,
    default_transport: OnceLock<Arc<dyn Transport>>,
}

impl fmt::Debug for ShortenerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortenerClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("custom_transport", &self.transport.read().is_some())
            .finish()
    }
}

impl ShortenerClient {
    /// Create a client from `api_key`, or from `GOOGLE_URL_SHORTENER_API_KEY`
    /// when `api_key` is `None` or blank.
    pub fn new(api_key: Option<&str>) -> Result<Self> {
        config::resolve_api_key(api_key).map(Self::from_key)
    }

    /// Create a client from `GOOGLE_URL_SHORTENER_API_KEY`.
    pub fn from_env() -> Result<Self> {
        config::api_key_from_env().map(Self::from_key)
    }

    fn from_key(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: RwLock::new(None),
            default_transport: OnceLock::new(),
        }
    }

    /// Point the client at a different endpoint base, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Builder form of `set_transport`.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        *self.transport.get_mut() = Some(transport);
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the transport used by all subsequent requests.
    pub fn set_transport(&self, transport: Arc<dyn Transport>) {
        *self.transport.write() = Some(transport);
    }

    /// The installed transport, or the network-backed default.
    pub fn current_transport(&self) -> Arc<dyn Transport> {
        let installed = self.transport.read().clone();
        match installed {
            Some(transport) => transport,
            None => Arc::clone(
                self.default_transport
                    .get_or_init(|| -> Arc<dyn Transport> { Arc::new(UreqTransport::new()) }),
            ),
        }
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Shorten `long_url`.
    ///
    /// The only validation is a blank-string check; the API itself accepts
    /// any non-empty value.
    pub fn shorten(&self, long_url: &str) -> Result<UrlDetails> {
        let request = self.build_shorten(long_url)?;
        decode_url_details(&self.execute(&request)?)
    }

    /// Expand `short_url` back to its long form.
    pub fn expand(&self, short_url: &str) -> Result<UrlDetails> {
        let request = self.build_expand(short_url)?;
        decode_url_details(&self.execute(&request)?)
    }

    /// Fetch the full click analytics for `short_url`.
    pub fn lookup_analytics(&self, short_url: &str) -> Result<Analytics> {
        let request = self.build_lookup_analytics(short_url)?;
        decode_analytics(&self.execute(&request)?)
    }

    /// Send `request` through the current transport and return the body of a
    /// 2xx response.
    fn execute(&self, request: &HttpRequest) -> Result<Vec<u8>> {
        let transport = self.current_transport();
        debug!(
            method = request.method.as_str(),
            endpoint = endpoint_for_log(&request.url),
            "sending request"
        );
        let response = transport.send(request).map_err(ShortenerError::Transport)?;
        debug!(status = response.status, "received response");
        check_status(response)
    }

    // -----------------------------------------------------------------------
    // Request builders
    // -----------------------------------------------------------------------

    pub fn build_shorten(&self, long_url: &str) -> Result<HttpRequest> {
        ensure_not_blank(long_url)?;
        let body = serde_json::to_string(&ShortenRequest { long_url }).map_err(ShortenerError::Serialization)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoint(&[("key", self.api_key.as_str())])?,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_expand(&self, short_url: &str) -> Result<HttpRequest> {
        ensure_not_blank(short_url)?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.endpoint(&[("shortUrl", short_url), ("key", self.api_key.as_str())])?,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_lookup_analytics(&self, short_url: &str) -> Result<HttpRequest> {
        ensure_not_blank(short_url)?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.endpoint(&[("shortUrl", short_url), ("key", self.api_key.as_str()), ("projection", "FULL")])?,
            headers: Vec::new(),
            body: None,
        })
    }

    fn endpoint(&self, params: &[(&str, &str)]) -> Result<String> {
        let url = Url::parse_with_params(&format!("{}/url", self.base_url), params)?;
        Ok(url.into())
    }

    // -----------------------------------------------------------------------
    // Response parsers
    // -----------------------------------------------------------------------

    /// Decode the response to a shorten or expand request.
    pub fn parse_url_details(&self, response: HttpResponse) -> Result<UrlDetails> {
        decode_url_details(&check_status(response)?)
    }

    /// Decode the response to an analytics request.
    pub fn parse_analytics(&self, response: HttpResponse) -> Result<Analytics> {
        decode_analytics(&check_status(response)?)
    }
}

/// Map a non-2xx response to `ShortenerError::Api`; hand back the body of a
/// 2xx one.
///
/// The error message is the status line, unless the body is longer than
/// three bytes, in which case the body text is used instead.
pub fn check_status(response: HttpResponse) -> Result<Vec<u8>> {
    if response.is_success() {
        return Ok(response.body);
    }
    let message = if response.body.len() > 3 {
        String::from_utf8_lossy(&response.body).into_owned()
    } else {
        response.status_line()
    };
    Err(ShortenerError::Api {
        status: response.status,
        message,
    })
}

pub fn decode_url_details(body: &[u8]) -> Result<UrlDetails> {
    from_json_object(body).map_err(ShortenerError::Decode)
}

pub fn decode_analytics(body: &[u8]) -> Result<Analytics> {
    from_json_object(body).map_err(ShortenerError::Decode)
}

fn ensure_not_blank(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ShortenerError::InvalidInput(BLANK_CONTENT));
    }
    Ok(())
}

/// The request URL without its query string, which carries the API key.
fn endpoint_for_log(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}
