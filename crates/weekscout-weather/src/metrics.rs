//! Daily forecast payload: named parallel series, one value per day.
//!
//! Series are validated wholesale. Anything other than an array of exactly
//! [`DAYS`] numbers is kept as [`Series::Malformed`] and later replaced by
//! the metric's default; there is no per-day patching.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Length of the forecast window
pub const DAYS: usize = 7;

/// Scored metrics and their fallback values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TemperatureMax,
    Precipitation,
    Snowfall,
    WindSpeed,
    Humidity,
    UvIndex,
    Daylight,
    Pollen,
}

impl Metric {
    pub const COUNT: usize = 8;

    pub const ALL: [Metric; Self::COUNT] = [
        Metric::TemperatureMax,
        Metric::Precipitation,
        Metric::Snowfall,
        Metric::WindSpeed,
        Metric::Humidity,
        Metric::UvIndex,
        Metric::Daylight,
        Metric::Pollen,
    ];

    /// Field name in the forecast payload
    pub fn key(&self) -> &'static str {
        match self {
            Self::TemperatureMax => "temperature_2m_max",
            Self::Precipitation => "precipitation_sum",
            Self::Snowfall => "snowfall_sum",
            Self::WindSpeed => "windspeed_10m_max",
            Self::Humidity => "humidity_2m_max",
            Self::UvIndex => "uv_index_max",
            Self::Daylight => "daylight_hours",
            Self::Pollen => "pollen_count",
        }
    }

    /// Value assumed for every day when the series is missing or malformed
    pub fn default_value(&self) -> f64 {
        match self {
            Self::TemperatureMax => 15.0,
            Self::Precipitation => 2.0,
            Self::Snowfall => 0.0,
            Self::WindSpeed => 10.0,
            Self::Humidity => 50.0,
            Self::UvIndex => 5.0,
            Self::Daylight => 12.0,
            Self::Pollen => 0.0,
        }
    }
}

/// One metric across the forecast window
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Series {
    /// Key absent from the payload
    #[default]
    Missing,
    /// Key present but not an array of exactly seven numbers
    Malformed,
    Week([f64; DAYS]),
}

impl Series {
    pub fn from_value(value: &Value) -> Self {
        let Value::Array(items) = value else {
            return Self::Malformed;
        };
        if items.len() != DAYS {
            return Self::Malformed;
        }
        let mut week = [0.0; DAYS];
        for (slot, item) in week.iter_mut().zip(items) {
            match item.as_f64() {
                Some(v) => *slot = v,
                None => return Self::Malformed,
            }
        }
        Self::Week(week)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn values(&self) -> Option<&[f64; DAYS]> {
        match self {
            Self::Week(values) => Some(values),
            Self::Missing | Self::Malformed => None,
        }
    }
}

impl From<[f64; DAYS]> for Series {
    fn from(values: [f64; DAYS]) -> Self {
        Self::Week(values)
    }
}

impl<'de> Deserialize<'de> for Series {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl Serialize for Series {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Week(values) => values.serialize(serializer),
            Self::Missing | Self::Malformed => serializer.serialize_none(),
        }
    }
}

fn lenient_dates<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let dates = match value {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().unwrap_or_default().to_string())
            .collect(),
        _ => Vec::new(),
    };
    Ok(Some(dates))
}

/// Daily forecast series as delivered by the weather API.
///
/// Deserialization never fails on a JSON object: bad series become
/// [`Series::Malformed`] and unrecognised keys are kept in `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    /// ISO dates, display only
    #[serde(
        default,
        deserialize_with = "lenient_dates",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Series::is_missing")]
    pub temperature_2m_max: Series,
    #[serde(default, skip_serializing_if = "Series::is_missing")]
    pub temperature_2m_min: Series,
    #[serde(default, skip_serializing_if = "Series::is_missing")]
    pub precipitation_sum: Series,
    #[serde(default, skip_serializing_if = "Series::is_missing")]
    pub snowfall_sum: Series,
    #[serde(default, skip_serializing_if = "Series::is_missing")]
    pub windspeed_10m_max: Series,
    #[serde(default, skip_serializing_if = "Series::is_missing")]
    pub humidity_2m_max: Series,
    #[serde(default, skip_serializing_if = "Series::is_missing")]
    pub uv_index_max: Series,
    #[serde(default, skip_serializing_if = "Series::is_missing")]
    pub daylight_hours: Series,
    #[serde(default, skip_serializing_if = "Series::is_missing")]
    pub pollen_count: Series,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl DailyMetrics {
    /// Read a payload from loose JSON. Returns `None` unless it is an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        match serde_json::from_value(value.clone()) {
            Ok(daily) => Some(daily),
            Err(e) => {
                tracing::debug!("Unreadable daily payload: {}", e);
                None
            }
        }
    }

    pub fn series(&self, metric: Metric) -> &Series {
        match metric {
            Metric::TemperatureMax => &self.temperature_2m_max,
            Metric::Precipitation => &self.precipitation_sum,
            Metric::Snowfall => &self.snowfall_sum,
            Metric::WindSpeed => &self.windspeed_10m_max,
            Metric::Humidity => &self.humidity_2m_max,
            Metric::UvIndex => &self.uv_index_max,
            Metric::Daylight => &self.daylight_hours,
            Metric::Pollen => &self.pollen_count,
        }
    }

    pub fn series_mut(&mut self, metric: Metric) -> &mut Series {
        match metric {
            Metric::TemperatureMax => &mut self.temperature_2m_max,
            Metric::Precipitation => &mut self.precipitation_sum,
            Metric::Snowfall => &mut self.snowfall_sum,
            Metric::WindSpeed => &mut self.windspeed_10m_max,
            Metric::Humidity => &mut self.humidity_2m_max,
            Metric::UvIndex => &mut self.uv_index_max,
            Metric::Daylight => &mut self.daylight_hours,
            Metric::Pollen => &mut self.pollen_count,
        }
    }

    /// Builder-style setter for a full week of one metric
    pub fn with(mut self, metric: Metric, values: [f64; DAYS]) -> Self {
        *self.series_mut(metric) = Series::Week(values);
        self
    }

    pub fn dates(&self) -> &[String] {
        self.time.as_deref().unwrap_or_default()
    }

    /// True when the payload carried no keys at all.
    pub fn is_empty(&self) -> bool {
        self.time.is_none()
            && self.temperature_2m_min.is_missing()
            && Metric::ALL.iter().all(|m| self.series(*m).is_missing())
            && self.other.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_series_accepts_seven_numbers() {
        let series = Series::from_value(&json!([1, 2, 3, 4, 5, 6, 7.5]));
        assert_eq!(series, Series::Week([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.5]));
    }

    #[test]
    fn test_series_rejects_wrong_length() {
        assert_eq!(Series::from_value(&json!([1, 2, 3])), Series::Malformed);
        assert_eq!(
            Series::from_value(&json!([1, 2, 3, 4, 5, 6, 7, 8])),
            Series::Malformed
        );
        assert_eq!(Series::from_value(&json!([])), Series::Malformed);
    }

    #[test]
    fn test_series_rejects_non_numeric_elements() {
        assert_eq!(
            Series::from_value(&json!([1, 2, null, 4, 5, 6, 7])),
            Series::Malformed
        );
        assert_eq!(
            Series::from_value(&json!(["1", 2, 3, 4, 5, 6, 7])),
            Series::Malformed
        );
    }

    #[test]
    fn test_series_rejects_non_arrays() {
        assert_eq!(Series::from_value(&json!(null)), Series::Malformed);
        assert_eq!(Series::from_value(&json!(12)), Series::Malformed);
        assert_eq!(Series::from_value(&json!({"a": 1})), Series::Malformed);
    }

    #[test]
    fn test_daily_from_value_requires_object() {
        assert!(DailyMetrics::from_value(&json!(null)).is_none());
        assert!(DailyMetrics::from_value(&json!([1, 2, 3])).is_none());
        assert!(DailyMetrics::from_value(&json!("daily")).is_none());
        assert!(DailyMetrics::from_value(&json!({})).is_some());
    }

    #[test]
    fn test_daily_tracks_missing_and_malformed() {
        let daily = DailyMetrics::from_value(&json!({
            "temperature_2m_max": [1, 2, 3, 4, 5, 6, 7],
            "snowfall_sum": "lots",
            "weathercode": [0, 1, 2, 3, 45, 61, 71],
        }))
        .unwrap();

        assert!(daily.series(Metric::TemperatureMax).values().is_some());
        assert_eq!(daily.snowfall_sum, Series::Malformed);
        assert!(daily.pollen_count.is_missing());
        assert!(daily.other.contains_key("weathercode"));
        assert!(!daily.is_empty());
    }

    #[test]
    fn test_empty_object_is_empty() {
        let daily = DailyMetrics::from_value(&json!({})).unwrap();
        assert!(daily.is_empty());
    }

    #[test]
    fn test_unknown_keys_make_payload_non_empty() {
        let daily = DailyMetrics::from_value(&json!({"foo": 1})).unwrap();
        assert!(!daily.is_empty());
    }

    #[test]
    fn test_dates_keep_positions() {
        let daily = DailyMetrics::from_value(&json!({
            "time": ["2026-01-05", 7, "2026-01-07"]
        }))
        .unwrap();
        assert_eq!(daily.dates(), ["2026-01-05", "", "2026-01-07"]);

        let daily = DailyMetrics::from_value(&json!({"time": "today"})).unwrap();
        assert!(daily.dates().is_empty());
    }

    #[test]
    fn test_builder_sets_series() {
        let daily = DailyMetrics::default().with(Metric::Pollen, [90.0; DAYS]);
        assert_eq!(daily.pollen_count, Series::Week([90.0; DAYS]));
        assert!(!daily.is_empty());
    }

    #[test]
    fn test_serialize_skips_missing() {
        let daily = DailyMetrics::default().with(Metric::Snowfall, [1.0; DAYS]);
        let value = serde_json::to_value(&daily).unwrap();
        assert_eq!(value, json!({"snowfall_sum": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]}));
    }
}
