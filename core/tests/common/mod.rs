//! In-process fake of the shortener API.
//!
//! `FixtureBackend` implements `Transport` by answering from the JSON files in
//! `testdata/`, using the same URL-to-fixture table as the mock server. It is
//! pinned to one route, so a request for another operation is rejected the
//! way a wrong method would be.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use googshorty::{Analytics, BoxError, HttpMethod, HttpRequest, HttpResponse, ShortenerClient, Transport, UrlDetails};
use mock_server::{long_url_key, short_url_key, DEFAULT_API_KEY, KNOWN_URLS};
use url::Url;

pub const API_KEY: &str = DEFAULT_API_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Shorten,
    Expand,
    Analytics,
}

pub struct FixtureBackend {
    route: Route,
    calls: AtomicUsize,
}

impl FixtureBackend {
    pub fn new(route: Route) -> Arc<Self> {
        Arc::new(Self {
            route,
            calls: AtomicUsize::new(0),
        })
    }

    /// Number of requests this backend has received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        let want = match self.route {
            Route::Shorten => HttpMethod::Post,
            Route::Expand | Route::Analytics => HttpMethod::Get,
        };
        if request.method != want {
            let msg = format!("got method {:?}, want {:?}", request.method.as_str(), want.as_str());
            return Ok(HttpResponse::new(405, "Method Not Allowed", msg));
        }

        let url = Url::parse(&request.url)?;
        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        let key = query.get("key").map(|k| k.trim()).unwrap_or_default();
        if key != API_KEY {
            return Ok(HttpResponse::new(401, "Unauthorized", "unauthorized api key"));
        }

        match self.route {
            Route::Shorten => {
                let body: HashMap<String, String> = serde_json::from_str(request.body.as_deref().unwrap_or_default())?;
                let long_url = body.get("longUrl").map(String::as_str).unwrap_or_default();
                Ok(response_from_file(url_details_path(&lookup(&long_url_key(long_url)))))
            }
            Route::Expand | Route::Analytics => {
                let short_url = query.get("shortUrl").map(|s| s.trim()).unwrap_or_default();
                if short_url.is_empty() {
                    return Ok(HttpResponse::new(400, "Bad Request", r#"expecting "shortUrl" in the query string"#));
                }
                let name = lookup(&short_url_key(short_url));
                let path = if self.route == Route::Analytics {
                    analytics_path(&name)
                } else {
                    url_details_path(&name)
                };
                Ok(response_from_file(path))
            }
        }
    }
}

impl Transport for FixtureBackend {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.respond(request)
    }
}

/// Fixture name for `key`, or an empty name that matches no file.
fn lookup(key: &str) -> String {
    KNOWN_URLS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| name.to_string())
        .unwrap_or_default()
}

fn response_from_file(path: PathBuf) -> HttpResponse {
    match std::fs::read(&path) {
        Ok(body) => HttpResponse::new(200, "OK", body),
        Err(e) => HttpResponse::new(500, "Internal Server Error", format!("{}: {e}", path.display())),
    }
}

pub fn testdata_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../testdata")
}

pub fn url_details_path(name: &str) -> PathBuf {
    testdata_dir().join(format!("url-details-{name}.json"))
}

pub fn analytics_path(name: &str) -> PathBuf {
    testdata_dir().join(format!("analytics-{name}.json"))
}

pub fn url_details_from_file(name: &str) -> UrlDetails {
    let raw = std::fs::read(url_details_path(name)).unwrap();
    serde_json::from_slice(&raw).unwrap()
}

pub fn analytics_from_file(name: &str) -> Analytics {
    let raw = std::fs::read(analytics_path(name)).unwrap();
    serde_json::from_slice(&raw).unwrap()
}

/// A client with the known API key, wired to a fixture backend for `route`.
pub fn client_for(route: Route) -> (ShortenerClient, Arc<FixtureBackend>) {
    let backend = FixtureBackend::new(route);
    let client = ShortenerClient::new(Some(API_KEY))
        .unwrap()
        .with_transport(backend.clone());
    (client, backend)
}
