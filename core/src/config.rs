//! API key resolution and endpoint defaults.

use crate::error::{Result, ShortenerError};

/// Environment variable consulted when no explicit API key is given.
pub const ENV_API_KEY: &str = "GOOGLE_URL_SHORTENER_API_KEY";

/// Base endpoint of the v1 URL shortener API.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/urlshortener/v1";

/// Return the first key that is not blank after trimming.
pub fn first_non_empty<'a, I>(keys: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    keys.into_iter().find(|k| !k.trim().is_empty())
}

/// Read the API key from `GOOGLE_URL_SHORTENER_API_KEY`.
///
/// An unset, blank (empty or whitespace-only) or non-UTF-8 variable is
/// reported as `MissingApiKey`.
pub fn api_key_from_env() -> Result<String> {
    match std::env::var(ENV_API_KEY) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ShortenerError::MissingApiKey),
    }
}

/// Use `explicit` when it holds a non-blank key, else fall back to the
/// environment.
pub fn resolve_api_key(explicit: Option<&str>) -> Result<String> {
    match first_non_empty(explicit) {
        Some(key) => Ok(key.to_string()),
        None => api_key_from_env(),
    }
}
