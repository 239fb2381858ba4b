//! Fixture-backed stand-in for the URL shortener API.
//!
//! Serves `/urlshortener/v1/url` the way the real endpoint does, but answers
//! from canned JSON files: `url-details-<name>.json` for shorten and expand,
//! `analytics-<name>.json` for `projection=FULL` lookups. `<name>` comes from a
//! small table keyed by the long URL's host (shorten) or the short URL's path
//! (expand, analytics).

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_API_KEY: &str = "api-key-1";
pub const ROUTE: &str = "/urlshortener/v1/url";

/// Long-URL hosts and short-URL paths the server knows about, mapped to
/// fixture names.
pub const KNOWN_URLS: &[(&str, &str)] = &[
    ("orijtech.com", "orijtech"),
    ("medisa.orijtech.com", "medisa"),
    ("Zu6ATj", "orijtech"),
    ("5ycdVx", "medisa"),
    ("XRdHKo", "googshorty"),
];

#[derive(Debug, Clone)]
pub struct Backend {
    api_keys: HashSet<String>,
    fixtures_dir: PathBuf,
    mapping: HashMap<String, String>,
}

impl Backend {
    /// A backend accepting `DEFAULT_API_KEY` and serving `KNOWN_URLS` from
    /// `fixtures_dir`.
    pub fn new(fixtures_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_keys: HashSet::from([DEFAULT_API_KEY.to_string()]),
            fixtures_dir: fixtures_dir.into(),
            mapping: KNOWN_URLS
                .iter()
                .map(|(key, name)| (key.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// Replace the set of accepted API keys.
    pub fn with_api_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.api_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn fixtures_dir(&self) -> &Path {
        &self.fixtures_dir
    }

    fn authorized(&self, key: Option<&str>) -> bool {
        key.map(str::trim).is_some_and(|k| self.api_keys.contains(k))
    }

    fn fixture(&self, key: &str, prefix: &str) -> Option<PathBuf> {
        let name = self.mapping.get(key)?;
        Some(self.fixtures_dir.join(format!("{prefix}-{name}.json")))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiQuery {
    pub key: Option<String>,
    #[serde(rename = "shortUrl")]
    pub short_url: Option<String>,
    pub projection: Option<String>,
}

#[derive(Deserialize)]
struct ShortenBody {
    #[serde(rename = "longUrl", default)]
    long_url: String,
}

pub fn app(backend: Backend) -> Router {
    Router::new()
        .route(ROUTE, get(lookup).post(shorten))
        .with_state(Arc::new(backend))
}

pub async fn run(listener: TcpListener, backend: Backend) -> Result<(), std::io::Error> {
    axum::serve(listener, app(backend)).await
}

async fn shorten(State(backend): State<Arc<Backend>>, Query(query): Query<ApiQuery>, body: Bytes) -> Response {
    if !backend.authorized(query.key.as_deref()) {
        return unauthorized();
    }
    let input: ShortenBody = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };
    let key = long_url_key(&input.long_url);
    debug!(%key, "shorten");
    serve_fixture(backend.fixture(&key, "url-details"), &key).await
}

async fn lookup(State(backend): State<Arc<Backend>>, Query(query): Query<ApiQuery>) -> Response {
    if !backend.authorized(query.key.as_deref()) {
        return unauthorized();
    }
    let short_url = query.short_url.as_deref().map(str::trim).unwrap_or_default();
    if short_url.is_empty() {
        return (StatusCode::BAD_REQUEST, r#"expecting "shortUrl" in the query string"#).into_response();
    }
    let key = short_url_key(short_url);
    let prefix = match query.projection.as_deref() {
        Some("FULL") => "analytics",
        _ => "url-details",
    };
    debug!(%key, prefix, "lookup");
    serve_fixture(backend.fixture(&key, prefix), &key).await
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "unauthorized api key").into_response()
}

async fn serve_fixture(path: Option<PathBuf>, key: &str) -> Response {
    let Some(path) = path else {
        warn!(%key, "no fixture registered");
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("no fixture registered for {key:?}")).into_response();
    };
    match tokio::fs::read(&path).await {
        Ok(contents) => ([(header::CONTENT_TYPE, "application/json")], contents).into_response(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "reading fixture failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{}: {e}", path.display())).into_response()
        }
    }
}

/// Shorten requests are keyed by the long URL's host.
pub fn long_url_key(long_url: &str) -> String {
    match Url::parse(long_url) {
        Ok(url) => url.host_str().unwrap_or_default().to_string(),
        Err(_) => long_url.to_string(),
    }
}

/// Expand and analytics requests are keyed by the short URL's path.
pub fn short_url_key(short_url: &str) -> String {
    match Url::parse(short_url) {
        Ok(url) => url.path().trim_start_matches('/').to_string(),
        Err(_) => short_url.to_string(),
    }
}
