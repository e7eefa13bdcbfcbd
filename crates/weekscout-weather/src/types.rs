use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::metrics::DailyMetrics;

/// Activities the outlook can recommend. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Activity {
    Skiing,
    Surfing,
    #[serde(rename = "Outdoor sightseeing")]
    OutdoorSightseeing,
    #[serde(rename = "Indoor sightseeing")]
    IndoorSightseeing,
}

impl Activity {
    /// All activities, in the order the scorer emits them.
    pub const ALL: [Activity; 4] = [
        Activity::Skiing,
        Activity::Surfing,
        Activity::OutdoorSightseeing,
        Activity::IndoorSightseeing,
    ];

    /// Display name, also the accepted spelling for parsing
    pub fn name(&self) -> &'static str {
        match self {
            Self::Skiing => "Skiing",
            Self::Surfing => "Surfing",
            Self::OutdoorSightseeing => "Outdoor sightseeing",
            Self::IndoorSightseeing => "Indoor sightseeing",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Skiing => "🎿",
            Self::Surfing => "🏄",
            Self::OutdoorSightseeing => "🌞",
            Self::IndoorSightseeing => "🏛️",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activity {
    type Err = UnknownActivity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|activity| activity.name() == s)
            .ok_or_else(|| UnknownActivity(s.to_string()))
    }
}

/// Returned when a name does not match any of the four activities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown activity: {0}")]
pub struct UnknownActivity(pub String);

/// A geocoded place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    /// Empty when the geocoder did not report a country
    pub country: String,
}

/// Seven-day daily forecast for one coordinate
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
    pub daily: DailyMetrics,
}

/// Forecast provider and geocoder errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API returned status {status}")]
    Api { status: u16 },
    #[error("Forecast response has no daily data")]
    MissingDaily,
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    /// Whether the same request may succeed if tried again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status } => *status >= 500 || *status == 429,
            Self::MissingDaily | Self::Parse(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_round_trips_through_name() {
        for activity in Activity::ALL {
            assert_eq!(activity.name().parse::<Activity>(), Ok(activity));
        }
    }

    #[test]
    fn test_activity_parse_is_exact() {
        assert!("skiing".parse::<Activity>().is_err());
        assert!("Outdoor Sightseeing".parse::<Activity>().is_err());
        assert_eq!(
            "UnknownActivity".parse::<Activity>(),
            Err(UnknownActivity("UnknownActivity".to_string()))
        );
    }

    #[test]
    fn test_activity_serializes_as_display_name() {
        let json = serde_json::to_string(&Activity::OutdoorSightseeing).unwrap();
        assert_eq!(json, "\"Outdoor sightseeing\"");
        let back: Activity = serde_json::from_str("\"Indoor sightseeing\"").unwrap();
        assert_eq!(back, Activity::IndoorSightseeing);
    }

    #[test]
    fn test_activity_meta() {
        assert_eq!(Activity::Skiing.icon(), "🎿");
        assert_eq!(Activity::Surfing.icon(), "🏄");
        assert_eq!(Activity::IndoorSightseeing.to_string(), "Indoor sightseeing");
    }

    #[test]
    fn test_api_error_retryable() {
        assert!(WeatherError::Api { status: 503 }.is_retryable());
        assert!(WeatherError::Api { status: 429 }.is_retryable());
        assert!(!WeatherError::Api { status: 400 }.is_retryable());
        assert!(!WeatherError::MissingDaily.is_retryable());
    }
}
