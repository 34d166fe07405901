//! MapQuest geocoding backend
//!
//! One GET per lookup against `/geocoding/v1/address`; no retries and no
//! caching. Transport defaults apply for timeouts.

use crate::config::GeocodeConfig;
use crate::constants::api::{IN_FORMAT, OUT_FORMAT, THUMB_MAPS};
use crate::error::{Error, Result};
use crate::geo::result::GeoCodeResult;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

/// MapQuest geocoding client
#[derive(Debug, Clone)]
pub struct GeoCodeService {
    client: reqwest::Client,
    base_url: String,
    path: String,
    api_key: String,
}

impl GeoCodeService {
    /// Create a client for the configured provider
    pub fn new(config: &GeocodeConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            path: config.path.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Build the lookup URL for an address.
    ///
    /// Spaces in the address become `+`; anything else reserved is
    /// percent-encoded.
    pub fn build_url(&self, address: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::UrlBuild(format!("{}: {}", self.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::UrlBuild(format!(
                "{}: not a hierarchical URL",
                self.base_url
            )));
        }

        let location = address
            .split(' ')
            .map(|word| urlencoding::encode(word).into_owned())
            .collect::<Vec<_>>()
            .join("+");

        url.set_path(&self.path);
        url.set_query(Some(&format!(
            "key={}&inFormat={}&outFormat={}&location={}&thumMaps={}",
            urlencoding::encode(&self.api_key),
            IN_FORMAT,
            OUT_FORMAT,
            location,
            THUMB_MAPS
        )));

        Ok(url)
    }

    /// Look up every candidate match for an address
    pub async fn geocode(&self, address: &str) -> Result<Vec<GeoCodeResult>> {
        let url = self.build_url(address)?;
        debug!(address, path = url.path(), "geocoding address");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            warn!(status = %response.status(), "geocoding provider returned non-success status");
        }

        let body = response.bytes().await?;
        let results = Self::parse_response(&body)?;
        debug!(address, count = results.len(), "geocoding finished");

        Ok(results)
    }

    /// Parse a provider response body.
    ///
    /// The envelope must be well formed; individual `locations` entries that
    /// lack coordinates are dropped without failing the whole response.
    pub fn parse_response(body: &[u8]) -> Result<Vec<GeoCodeResult>> {
        if body.is_empty() {
            return Err(Error::NoData);
        }

        let json: Value = serde_json::from_slice(body).map_err(|_| Error::NonJsonFormat)?;

        let results = json
            .get("results")
            .and_then(Value::as_array)
            .filter(|results| results.iter().all(Value::is_object))
            .ok_or(Error::InvalidFormat)?;
        let first = results.first().ok_or(Error::InvalidFormat)?;

        let location_string = first
            .get("providedLocation")
            .and_then(|provided| provided.get("location"))
            .and_then(Value::as_str)
            .ok_or(Error::InvalidFormat)?;

        let locations = first
            .get("locations")
            .and_then(Value::as_array)
            .ok_or(Error::InvalidFormat)?
            .iter()
            .map(Value::as_object)
            .collect::<Option<Vec<_>>>()
            .ok_or(Error::InvalidFormat)?;

        let parsed: Vec<GeoCodeResult> = locations
            .into_iter()
            .filter_map(|fragment| GeoCodeResult::from_fragment(fragment, location_string))
            .collect();

        Ok(parsed)
    }
}

impl Default for GeoCodeService {
    fn default() -> Self {
        Self::new(&GeocodeConfig::default())
    }
}
