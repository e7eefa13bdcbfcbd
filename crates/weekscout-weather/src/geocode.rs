//! Forward geocoding: turn a free-text place into coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use crate::retry::{with_retry, RetryConfig};
use crate::types::{Place, WeatherError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;
/// Default identity sent to Nominatim, matching the `geocoding.user_agent` config default
pub const USER_AGENT: &str = concat!("weekscout/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
    retry: RetryConfig,
}

impl Geocoder {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry: RetryConfig::default(),
        })
    }

    pub fn nominatim() -> Result<Self, WeatherError> {
        Self::new(
            NOMINATIM_URL,
            USER_AGENT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Resolve `query` to the best matching place.
    /// Returns `Ok(None)` for a blank query or when nothing matches.
    pub async fn search(&self, query: &str) -> Result<Option<Place>, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        with_retry(&self.retry, move || self.search_once(query)).await
    }

    async fn search_once(&self, query: &str) -> Result<Option<Place>, WeatherError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Geocode returned status {}", response.status());
            return Err(WeatherError::Api {
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        let results: Vec<NominatimPlace> =
            serde_json::from_slice(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        let Some(first) = results.into_iter().next() else {
            tracing::info!("No geocoding match for '{}'", query);
            return Ok(None);
        };

        let place = into_place(first, query)?;
        tracing::info!(
            "Geocoded '{}' to {} ({}, {})",
            query,
            place.name,
            place.latitude,
            place.longitude
        );
        Ok(Some(place))
    }
}

fn parse_coordinate(raw: &str, field: &str) -> Result<f64, WeatherError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| WeatherError::Parse(format!("invalid {}: {}", field, raw)))
}

fn into_place(result: NominatimPlace, query: &str) -> Result<Place, WeatherError> {
    let latitude = parse_coordinate(&result.lat, "lat")?;
    let longitude = parse_coordinate(&result.lon, "lon")?;

    let (name, country) = match result.address {
        Some(addr) => {
            // Prefer city > town > village > municipality for the place name
            let name = addr
                .city
                .or(addr.town)
                .or(addr.village)
                .or(addr.municipality)
                .or(addr.county)
                .or(addr.state)
                .filter(|n| !n.is_empty());
            (name, addr.country.unwrap_or_default())
        }
        None => (None, String::new()),
    };

    Ok(Place {
        latitude,
        longitude,
        name: name.unwrap_or_else(|| query.to_string()),
        country,
    })
}
