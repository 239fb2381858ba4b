//! Value objects returned by the URL shortener API.
//!
//! # Design
//! Field names follow Rust conventions; `serde` attributes carry the wire
//! names. The API transmits click and count numbers as decimal strings, so
//! those fields go through `DisplayFromStr` and decode to `u64`. Anything
//! other than an unsigned integer in those strings is a decode error.
//!
//! Analytics time windows are `Option`s: a window the server omits means
//! there is no data for it, which is not the same as zero clicks. A `null`
//! list or string is read as empty.
//!
//! Every nested struct is read through `Object`, so a JSON array standing in
//! for an object is rejected instead of being matched field by position.

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::de::value::MapAccessDeserializer;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{serde_as, DefaultOnNull, DeserializeAs, DisplayFromStr, SerializeAs};

/// Result of shortening or expanding a URL.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlDetails {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub kind: String,
    /// The short URL, e.g. `https://goo.gl/Zu6ATj`.
    #[serde(rename = "id")]
    pub short_url: String,
    #[serde(rename = "longUrl", default, skip_serializing_if = "Option::is_none")]
    pub long_url: Option<String>,
    /// Status of the mapping, e.g. `"OK"`. The shorten endpoint may omit it.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "status", default)]
    pub status_message: String,
}

/// Body of a shorten request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ShortenRequest<'a> {
    #[serde(rename = "longUrl")]
    pub long_url: &'a str,
}

/// Analytics for a short URL, as returned with `projection=FULL`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analytics {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub kind: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub id: String,
    #[serde(rename = "longUrl", default, skip_serializing_if = "Option::is_none")]
    pub long_url: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub status: String,
    #[serde(rename = "created", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde_as(as = "Option<Object>")]
    #[serde(rename = "analytics", skip_serializing_if = "Option::is_none")]
    pub analytic: Option<Analytic>,
}

/// Click statistics bucketed by time window.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analytic {
    #[serde_as(as = "Option<Object>")]
    #[serde(rename = "allTime", skip_serializing_if = "Option::is_none")]
    pub all_time: Option<AnalyticDetails>,
    #[serde_as(as = "Option<Object>")]
    #[serde(rename = "month", skip_serializing_if = "Option::is_none")]
    pub within_last_month: Option<AnalyticDetails>,
    #[serde_as(as = "Option<Object>")]
    #[serde(rename = "week", skip_serializing_if = "Option::is_none")]
    pub within_last_week: Option<AnalyticDetails>,
    #[serde_as(as = "Option<Object>")]
    #[serde(rename = "day", skip_serializing_if = "Option::is_none")]
    pub within_last_day: Option<AnalyticDetails>,
    #[serde_as(as = "Option<Object>")]
    #[serde(rename = "twoHours", skip_serializing_if = "Option::is_none")]
    pub within_last_2_hours: Option<AnalyticDetails>,
}

/// Statistics for one time window. The lists keep the server's order.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticDetails {
    #[serde_as(as = "DefaultOnNull<DisplayFromStr>")]
    #[serde(rename = "shortUrlClicks", default)]
    pub short_url_clicks: u64,
    #[serde_as(as = "DefaultOnNull<DisplayFromStr>")]
    #[serde(rename = "longUrlClicks", default)]
    pub long_url_clicks: u64,
    #[serde_as(as = "DefaultOnNull<Vec<Object>>")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub referrers: Vec<CountIdPair>,
    #[serde_as(as = "DefaultOnNull<Vec<Object>>")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<CountIdPair>,
    #[serde_as(as = "DefaultOnNull<Vec<Object>>")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub browsers: Vec<CountIdPair>,
    #[serde_as(as = "DefaultOnNull<Vec<Object>>")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<CountIdPair>,
}

/// A labelled count, e.g. a country code and the clicks from it.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountIdPair {
    #[serde_as(as = "DisplayFromStr")]
    pub count: u64,
    pub id: String,
}

/// Reads a struct only from a JSON object. Derived struct impls would also
/// take a sequence and assign its elements to fields in declaration order.
pub(crate) struct Object;

struct ObjectVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ObjectVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<T, A::Error> {
        T::deserialize(MapAccessDeserializer::new(map))
    }
}

impl<'de, T: Deserialize<'de>> DeserializeAs<'de, T> for Object {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
        deserializer.deserialize_map(ObjectVisitor(PhantomData))
    }
}

impl<T: Serialize> SerializeAs<T> for Object {
    fn serialize_as<S: Serializer>(source: &T, serializer: S) -> Result<S::Ok, S::Error> {
        source.serialize(serializer)
    }
}

/// Decode a complete JSON document whose top level must be an object.
pub(crate) fn from_json_object<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value = <Object as DeserializeAs<'_, T>>::deserialize_as(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}
