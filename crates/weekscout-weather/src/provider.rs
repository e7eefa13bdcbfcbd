//! Seven-day daily forecast from Open-Meteo.

use crate::metrics::DailyMetrics;
use crate::retry::{with_retry, RetryConfig};
use crate::types::{Forecast, WeatherError};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const FORECAST_DAYS: &str = "7";

/// Daily variables requested by default. Scored metrics the API does not
/// return fall back to their defaults.
pub const DEFAULT_DAILY_FIELDS: &[&str] = &[
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "snowfall_sum",
    "windspeed_10m_max",
    "weathercode",
];

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    daily: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct ForecastProvider {
    client: Arc<Client>,
    base_url: String,
    daily_fields: String,
    retry: RetryConfig,
}

impl ForecastProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            daily_fields: DEFAULT_DAILY_FIELDS.join(","),
            retry: RetryConfig::default(),
        })
    }

    /// Provider against the public Open-Meteo endpoint
    pub fn open_meteo() -> Result<Self, WeatherError> {
        Self::new(OPEN_METEO_URL, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Replace the requested daily variables
    pub fn with_daily_fields(mut self, fields: &[&str]) -> Self {
        self.daily_fields = fields.join(",");
        self
    }

    /// Replace the retry policy for transient failures
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch the next seven days for a coordinate, retrying transient failures.
    pub async fn fetch(&self, latitude: f64, longitude: f64) -> Result<Forecast, WeatherError> {
        with_retry(&self.retry, move || self.fetch_once(latitude, longitude)).await
    }

    async fn fetch_once(&self, latitude: f64, longitude: f64) -> Result<Forecast, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url);
        tracing::debug!("Fetching forecast for {}, {}", latitude, longitude);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("daily", self.daily_fields.clone()),
                ("forecast_days", FORECAST_DAYS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Forecast request returned status {}", status);
            return Err(WeatherError::Api {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: ForecastResponse =
            serde_json::from_slice(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        let daily = parsed
            .daily
            .as_ref()
            .and_then(DailyMetrics::from_value)
            .ok_or(WeatherError::MissingDaily)?;

        tracing::info!(
            "Fetched {}-day forecast for {}, {}",
            daily.dates().len(),
            parsed.latitude,
            parsed.longitude
        );

        Ok(Forecast {
            latitude: parsed.latitude,
            longitude: parsed.longitude,
            timezone: parsed.timezone,
            daily,
        })
    }
}
