//! Nominatim site specifics
//!
//! Two endpoints are consumed:
//!
//! 1. `GET /search?q=…&format=json&addressdetails=1&limit=5` for free-text
//!    queries, answered as a JSON array of results
//! 2. `GET /reverse?lat=…&lon=…&format=json` for coordinate → address lookup
//!
//! The public instance requires an identifying `user-agent` header on every
//! call.  `lat`/`lon` come back as strings on the public instance but some
//! deployments send numbers, so we accept both.
//!

use clap::{crate_name, crate_version};
use serde::{Deserialize, Deserializer};
use tracing::{debug, trace};

use safar_common::{Coordinate, Place};

use crate::GeocodeError;

/// Default public instance.
pub const NOMINATIM_BASE: &str = "https://nominatim.openstreetmap.org";

/// Hard cap on suggestions, also sent as `limit=`.
const MAX_RESULTS: usize = 5;

/// Nominatim represents what is needed to connect to and query the search
/// site.  No authentication, only the identifying header.
///
#[derive(Clone, Debug)]
pub struct Nominatim {
    /// Base site url taken from config
    pub base_url: String,
    /// reqwest client
    pub client: reqwest::Client,
}

impl Nominatim {
    pub fn new() -> Self {
        Self::with_base(NOMINATIM_BASE)
    }

    /// Point the client somewhere else (tests, self-hosted instance).
    ///
    pub fn with_base(base_url: &str) -> Self {
        Nominatim {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client: reqwest::Client::new(),
        }
    }

    /// Free-text search, at most [`MAX_RESULTS`] places in response order.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        trace!("nominatim::search");

        let url = format!("{}/search", self.base_url);
        let limit = MAX_RESULTS.to_string();
        let resp = self
            .client
            .get(url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", limit.as_str()),
            ])
            .header(
                "user-agent",
                format!("{}/{}", crate_name!(), crate_version!()),
            )
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(GeocodeError::BadStatus(resp.status().as_u16()));
        }

        let entries: Vec<SearchEntry> = resp
            .json()
            .await
            .map_err(|e| GeocodeError::Decoding(e.to_string()))?;

        let places = entries
            .into_iter()
            .take(MAX_RESULTS)
            .map(|e| Place {
                coord: Coordinate::new(e.lat, e.lon),
                address: e.display_name,
            })
            .collect::<Vec<_>>();
        debug!("{} places", places.len());
        Ok(places)
    }

    /// Coordinate → display address, one result.  On any failure we fall
    /// back to the formatted placeholder, reverse lookup is best effort.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn reverse(&self, coord: Coordinate) -> String {
        match self.try_reverse(coord).await {
            Ok(address) => address,
            Err(e) => {
                debug!("reverse failed: {e}");
                coord.placeholder_address()
            }
        }
    }

    async fn try_reverse(&self, coord: Coordinate) -> Result<String, GeocodeError> {
        trace!("nominatim::reverse");

        let url = format!("{}/reverse", self.base_url);
        let resp = self
            .client
            .get(url)
            .query(&[
                ("lat", coord.lat.to_string().as_str()),
                ("lon", coord.lon.to_string().as_str()),
                ("format", "json"),
            ])
            .header(
                "user-agent",
                format!("{}/{}", crate_name!(), crate_version!()),
            )
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(GeocodeError::BadStatus(resp.status().as_u16()));
        }

        let entry: ReverseEntry = resp
            .json()
            .await
            .map_err(|e| GeocodeError::Decoding(e.to_string()))?;
        Ok(entry.display_name)
    }
}

impl Default for Nominatim {
    fn default() -> Self {
        Self::new()
    }
}

/// One element of the `/search` JSON array.
///
#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(deserialize_with = "de_coord")]
    lat: f64,
    #[serde(deserialize_with = "de_coord")]
    lon: f64,
    display_name: String,
}

/// Payload from `/reverse`.
///
#[derive(Debug, Deserialize)]
struct ReverseEntry {
    display_name: String,
}

/// Nominatim sends coordinates as strings, other deployments as numbers.
///
fn de_coord<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let v = serde_json::Value::deserialize(d)?;
    match &v {
        serde_json::Value::String(s) => s.parse::<f64>().map_err(D::Error::custom),
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("bad coordinate {n}"))),
        _ => Err(D::Error::custom(format!("bad coordinate {v}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use httpmock::prelude::*;
    use serde_json::json;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[tokio::test]
    async fn test_search_parses_string_coords() {
        init();
        let server = MockServer::start_async().await;
        let body = json!([
            {"lat": "12.9767936", "lon": "77.590082", "display_name": "Bengaluru, Karnataka, India"},
            {"lat": 12.95, "lon": 77.64, "display_name": "Somewhere else"}
        ]);
        let m = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search")
                    .query_param("q", "bengaluru")
                    .query_param("format", "json")
                    .query_param("addressdetails", "1")
                    .query_param("limit", "5")
                    .header(
                        "user-agent",
                        format!("{}/{}", crate_name!(), crate_version!()),
                    );
                then.status(200).json_body(body.clone());
            })
            .await;

        let site = Nominatim::with_base(&server.base_url());
        let places = site.search("bengaluru").await.unwrap();
        m.assert_async().await;
        assert_eq!(2, places.len());
        assert_eq!("Bengaluru, Karnataka, India", places[0].address);
        assert_eq!(12.9767936, places[0].coord.lat);
        assert_eq!(77.64, places[1].coord.lon);
    }

    #[tokio::test]
    async fn test_search_bad_status() {
        init();
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(503);
            })
            .await;

        let site = Nominatim::with_base(&server.base_url());
        let res = site.search("anything").await;
        assert!(matches!(res, Err(GeocodeError::BadStatus(503))));
    }

    #[tokio::test]
    async fn test_reverse_ok() {
        init();
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(GET).path("/reverse").query_param("format", "json");
                then.status(200)
                    .json_body(json!({"display_name": "MG Road, Bengaluru"}));
            })
            .await;

        let site = Nominatim::with_base(&server.base_url());
        let addr = site.reverse(Coordinate::new(12.9716, 77.5946)).await;
        assert_eq!("MG Road, Bengaluru", addr);
    }

    #[tokio::test]
    async fn test_reverse_falls_back_to_placeholder() {
        init();
        let server = MockServer::start_async().await;
        let _m = server
            .mock_async(|when, then| {
                when.method(GET).path("/reverse");
                then.status(500);
            })
            .await;

        let site = Nominatim::with_base(&server.base_url());
        let addr = site.reverse(Coordinate::new(12.9716, 77.5946)).await;
        assert_eq!("Lat: 12.9716, Lng: 77.5946", addr);
    }
}
