//! Reduces the daily series to the values the scorer reads.

use serde::Serialize;

use crate::metrics::{DailyMetrics, Metric, Series, DAYS};

/// One set of scored values: either a single day or the weekly mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Conditions {
    pub temperature_max: f64,
    pub precipitation: f64,
    pub snowfall: f64,
    pub wind_speed: f64,
    pub humidity: f64,
    pub uv_index: f64,
    pub daylight_hours: f64,
    pub pollen: f64,
}

impl Conditions {
    fn from_fn(mut value: impl FnMut(Metric) -> f64) -> Self {
        Self {
            temperature_max: value(Metric::TemperatureMax),
            precipitation: value(Metric::Precipitation),
            snowfall: value(Metric::Snowfall),
            wind_speed: value(Metric::WindSpeed),
            humidity: value(Metric::Humidity),
            uv_index: value(Metric::UvIndex),
            daylight_hours: value(Metric::Daylight),
            pollen: value(Metric::Pollen),
        }
    }

    /// Every metric at its default
    pub fn defaults() -> Self {
        Self::from_fn(|metric| metric.default_value())
    }
}

/// Series with defaults substituted, ready for scoring.
#[derive(Debug, Clone)]
pub struct ResolvedWeek {
    columns: [[f64; DAYS]; Metric::COUNT],
}

impl ResolvedWeek {
    pub fn resolve(daily: &DailyMetrics) -> Self {
        let columns = Metric::ALL.map(|metric| match daily.series(metric) {
            Series::Week(values) => *values,
            Series::Missing => [metric.default_value(); DAYS],
            Series::Malformed => {
                tracing::debug!(
                    "Malformed {} series, using default {}",
                    metric.key(),
                    metric.default_value()
                );
                [metric.default_value(); DAYS]
            }
        });
        Self { columns }
    }

    fn column(&self, metric: Metric) -> &[f64; DAYS] {
        &self.columns[metric as usize]
    }

    /// Arithmetic mean of each metric, unrounded
    pub fn average(&self) -> Conditions {
        Conditions::from_fn(|metric| {
            let column = self.column(metric);
            column.iter().sum::<f64>() / column.len() as f64
        })
    }

    /// Raw values for one day. `None` past the end of the window.
    pub fn day(&self, index: usize) -> Option<Conditions> {
        if index >= DAYS {
            return None;
        }
        Some(Conditions::from_fn(|metric| self.column(metric)[index]))
    }
}

/// Weekly means with defaults applied to missing or malformed series.
pub fn weekly_average(daily: &DailyMetrics) -> Conditions {
    ResolvedWeek::resolve(daily).average()
}
