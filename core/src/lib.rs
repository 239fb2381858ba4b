//! Blocking client for the Google URL Shortener v1 API.
//!
//! # Overview
//! Shortens long URLs, expands short URLs, and fetches click analytics.
//! Every operation is one HTTP round trip translated to and from JSON.
//!
//! # Design
//! - `ShortenerClient` holds the API key, the endpoint base, and a swappable
//!   `Transport`. The default transport talks to the network through `ureq`;
//!   tests install a fake that never leaves the process.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and a
//!   decoder, so request construction and response decoding are pure and can
//!   be tested without any transport at all.
//! - No retries, caching or rate limiting. Every failure is returned to the
//!   caller as a `ShortenerError`.
//!
//! ```no_run
//! use googshorty::ShortenerClient;
//!
//! let client = ShortenerClient::from_env()?;
//! let details = client.shorten("https://github.com/orijtech/googshorty")?;
//! println!("short url: {}", details.short_url);
//! # Ok::<(), googshorty::ShortenerError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{check_status, ShortenerClient};
pub use config::{DEFAULT_BASE_URL, ENV_API_KEY};
pub use error::{Result, ShortenerError};
pub use http::{BoxError, HttpMethod, HttpRequest, HttpResponse, Transport};
pub use transport::UreqTransport;
pub use types::{Analytic, AnalyticDetails, Analytics, CountIdPair, UrlDetails};
